use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Pacing and placement knobs of the round engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Time between planting a bomb and its detonation.
    pub fuse: Duration,
    /// Time for the blast to travel one cell.
    pub blast_step: Duration,
    /// Pause between the last blast cell and evaluating the round.
    pub settle: Duration,
    /// Time a finished round stays on screen before a new one starts.
    pub restart_delay: Duration,
    pub auto_restart: bool,
    /// How far each arm of the blast reaches.
    pub blast_range: u8,
    pub placement_attempts: u32,
}

impl EngineConfig {
    pub const fn new() -> Self {
        Self {
            fuse: Duration::from_secs(2),
            blast_step: Duration::from_millis(100),
            settle: Duration::from_millis(100),
            restart_delay: Duration::from_secs(5),
            auto_restart: true,
            blast_range: 2,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }

    /// Longest time from planting a bomb until the round is evaluated.
    pub fn bomb_cycle(&self) -> Duration {
        self.fuse + self.blast_step * u32::from(self.blast_range) + self.settle
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
