use serde::{Deserialize, Serialize};

use crate::*;

/// Durable win/loss counters the engine reports finished rounds to.
///
/// The engine never reads these back during play, persistence is up to the implementation.
pub trait StatisticsStore {
    fn record_result(&mut self, won: bool, difficulty: Difficulty);

    fn wins_for(&self, difficulty: Difficulty) -> u32;

    fn total_games(&self) -> u32;

    fn reset(&mut self);
}

impl<S: StatisticsStore + ?Sized> StatisticsStore for &mut S {
    fn record_result(&mut self, won: bool, difficulty: Difficulty) {
        (**self).record_result(won, difficulty)
    }

    fn wins_for(&self, difficulty: Difficulty) -> u32 {
        (**self).wins_for(difficulty)
    }

    fn total_games(&self) -> u32 {
        (**self).total_games()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// In-memory counters, serializable so an adapter can store them wherever it likes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    pub wins_easy: u32,
    pub wins_medium: u32,
    pub wins_hard: u32,
    pub total_games: u32,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_wins(&self) -> u32 {
        Difficulty::ALL
            .into_iter()
            .map(|difficulty| self.wins_for(difficulty))
            .fold(0, u32::saturating_add)
    }

    pub fn losses(&self) -> u32 {
        self.total_games.saturating_sub(self.total_wins())
    }

    /// Share of games won, `None` before the first game.
    pub fn win_rate(&self) -> Option<f64> {
        (self.total_games > 0).then(|| f64::from(self.total_wins()) / f64::from(self.total_games))
    }

    fn wins_mut(&mut self, difficulty: Difficulty) -> &mut u32 {
        use Difficulty::*;
        match difficulty {
            Easy => &mut self.wins_easy,
            Medium => &mut self.wins_medium,
            Hard => &mut self.wins_hard,
        }
    }
}

impl StatisticsStore for GameStatistics {
    fn record_result(&mut self, won: bool, difficulty: Difficulty) {
        self.total_games = self.total_games.saturating_add(1);
        if won {
            let wins = self.wins_mut(difficulty);
            *wins = wins.saturating_add(1);
        }
    }

    fn wins_for(&self, difficulty: Difficulty) -> u32 {
        use Difficulty::*;
        match difficulty {
            Easy => self.wins_easy,
            Medium => self.wins_medium,
            Hard => self.wins_hard,
        }
    }

    fn total_games(&self) -> u32 {
        self.total_games
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn losses_only_count_towards_total() {
        let mut stats = GameStatistics::new();
        assert_eq!(stats.win_rate(), None);

        stats.record_result(true, Difficulty::Easy);
        stats.record_result(false, Difficulty::Easy);
        stats.record_result(true, Difficulty::Hard);
        stats.record_result(false, Difficulty::Medium);

        assert_eq!(stats.total_games(), 4);
        assert_eq!(stats.wins_for(Difficulty::Easy), 1);
        assert_eq!(stats.wins_for(Difficulty::Medium), 0);
        assert_eq!(stats.wins_for(Difficulty::Hard), 1);
        assert_eq!(stats.losses(), 2);
        assert_eq!(stats.win_rate(), Some(0.5));
    }

    fn record_win(mut store: impl StatisticsStore, difficulty: Difficulty) {
        store.record_result(true, difficulty);
    }

    #[test]
    fn reset_clears_everything() {
        let mut stats = GameStatistics::new();
        record_win(&mut stats, Difficulty::Medium);
        assert_eq!(stats.total_wins(), 1);

        stats.reset();
        assert_eq!(stats, GameStatistics::default());
    }
}
