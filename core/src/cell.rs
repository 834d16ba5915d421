use serde::{Deserialize, Serialize};

/// Authoritative state of a single grid cell stored by the round engine.
///
/// A rock never carries any of the other flags and can't be destroyed. Destroying a star cell keeps `has_star` set,
/// that combination is what marks the star as collected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub has_star: bool,
    pub has_rock: bool,
    pub has_star_dust: bool,
    pub is_destroyed: bool,
    pub has_bomb: bool,
}

impl CellState {
    pub const fn rock() -> Self {
        Self {
            has_star: false,
            has_rock: true,
            has_star_dust: false,
            is_destroyed: false,
            has_bomb: false,
        }
    }

    pub const fn star() -> Self {
        Self {
            has_star: true,
            has_rock: false,
            has_star_dust: false,
            is_destroyed: false,
            has_bomb: false,
        }
    }

    pub const fn accepts_bomb(self) -> bool {
        !self.is_destroyed && !self.has_bomb && !self.has_rock
    }

    pub const fn is_collected_star(self) -> bool {
        self.has_star && self.is_destroyed
    }

    pub const fn is_hidden_star(self) -> bool {
        self.has_star && !self.is_destroyed
    }
}
