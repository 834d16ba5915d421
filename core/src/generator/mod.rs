use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, params: DifficultyParams) -> Layout;
}

/// Default number of samples spent on each of the rock and star passes.
pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 1000;
