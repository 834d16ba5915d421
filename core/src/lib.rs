//! Round engine for a star-hunting bomb game: plant one bomb at a time, let its cross-shaped blast dig up stars,
//! and mind the rocks that stop it.
#![no_std]

extern crate alloc;

pub use cell::*;
pub use config::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use generator::*;
pub use layout::*;
pub use stats::*;
pub use timeline::*;
pub use types::*;

mod cell;
mod config;
mod difficulty;
mod engine;
mod error;
mod events;
mod generator;
mod layout;
mod stats;
mod timeline;
mod types;
