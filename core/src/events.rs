use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Notifications emitted by the round engine for renderers, audio and other collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        round: RoundId,
        difficulty: Difficulty,
        stars: CellCount,
        rocks: CellCount,
    },
    BombPlanted(GridPosition),
    BombDetonated(GridPosition),
    CellDestroyed {
        position: GridPosition,
        had_star: bool,
        had_dust: bool,
    },
    RoundWon,
    /// Stars still buried when the round was lost, revealed for display only.
    RoundLost {
        stars_remaining: CellCount,
        hidden_stars: Vec<GridPosition>,
    },
    RoundRestarting,
}

impl GameEvent {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::RoundWon | Self::RoundLost { .. })
    }
}

/// Anything that wants to observe engine events.
pub trait EventSink {
    fn handle(&mut self, event: &GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn handle(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn handle(&mut self, event: &GameEvent) {
        (**self).handle(event)
    }
}

/// Sound effect played for an event, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    PlantBomb,
    BlowBomb,
    FindStar,
    Won,
    Lose,
}

impl SoundCue {
    pub const fn for_event(event: &GameEvent) -> Option<Self> {
        use GameEvent::*;
        match event {
            BombPlanted(_) => Some(Self::PlantBomb),
            BombDetonated(_) => Some(Self::BlowBomb),
            CellDestroyed { had_star: true, .. } => Some(Self::FindStar),
            RoundWon => Some(Self::Won),
            RoundLost { .. } => Some(Self::Lose),
            _ => None,
        }
    }

    pub const fn file_name(self) -> &'static str {
        use SoundCue::*;
        match self {
            PlantBomb => "plant_bomb.wav",
            BlowBomb => "blow_bomb.wav",
            FindStar => "find_star.wav",
            Won => "won.wav",
            Lose => "lose.wav",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_star_cells_get_a_cue_when_destroyed() {
        let position = GridPosition::new(1, 1);
        let plain = GameEvent::CellDestroyed {
            position,
            had_star: false,
            had_dust: true,
        };
        let star = GameEvent::CellDestroyed {
            position,
            had_star: true,
            had_dust: false,
        };

        assert_eq!(SoundCue::for_event(&plain), None);
        assert_eq!(SoundCue::for_event(&star), Some(SoundCue::FindStar));
        assert_eq!(SoundCue::for_event(&GameEvent::RoundRestarting), None);
        assert_eq!(SoundCue::Lose.file_name(), "lose.wav");
    }

    #[test]
    fn events_survive_json() {
        let event = GameEvent::RoundLost {
            stars_remaining: 2,
            hidden_stars: alloc::vec![GridPosition::new(0, 3), GridPosition::new(5, 5)],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(serde_json::from_str::<GameEvent>(&json).unwrap(), event);
        assert!(event.is_terminal());
    }
}
