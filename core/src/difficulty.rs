use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Fixed round parameters for a difficulty tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyParams {
    pub grid_size: Coord,
    pub total_stars: CellCount,
    pub total_rocks: CellCount,
    pub max_bombs: CellCount,
}

impl DifficultyParams {
    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn parameters(self) -> DifficultyParams {
        use Difficulty::*;
        match self {
            Easy => DifficultyParams {
                grid_size: 9,
                total_stars: 6,
                total_rocks: 10,
                max_bombs: 9,
            },
            Medium => DifficultyParams {
                grid_size: 12,
                total_stars: 10,
                total_rocks: 18,
                max_bombs: 15,
            },
            Hard => DifficultyParams {
                grid_size: 15,
                total_stars: 12,
                total_rocks: 28,
                max_bombs: 22,
            },
        }
    }

    pub const fn display_name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy",
            Medium => "Medium",
            Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.display_name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownDifficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easy_tier_matches_table() {
        let params = Difficulty::Easy.parameters();
        assert_eq!(params.grid_size, 9);
        assert_eq!(params.total_stars, 6);
        assert_eq!(params.total_rocks, 10);
        assert_eq!(params.max_bombs, 9);
        assert_eq!(params.total_cells(), 81);
    }

    #[test]
    fn tiers_grow_with_difficulty() {
        let [easy, medium, hard] = Difficulty::ALL.map(Difficulty::parameters);
        assert!(easy.grid_size < medium.grid_size && medium.grid_size < hard.grid_size);
        assert_eq!((hard.grid_size, hard.total_stars, hard.total_rocks, hard.max_bombs), (15, 12, 28, 22));
        assert_eq!((medium.grid_size, medium.total_stars, medium.total_rocks, medium.max_bombs), (12, 10, 18, 15));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("expert".parse::<Difficulty>(), Err(GameError::UnknownDifficulty));
    }
}
