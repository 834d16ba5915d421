use rand::rngs::SmallRng;
use stardust_core::*;

/// Picks bomb targets using only what a player would see: rocks, destroyed cells and the dust they uncovered.
#[derive(Debug)]
pub struct AutoPlayer {
    rng: SmallRng,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        use rand::prelude::*;

        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Next target, `None` when the engine wouldn't take a bomb right now.
    pub fn choose<S: StatisticsStore>(&mut self, engine: &RoundEngine<S>) -> Option<GridPosition> {
        use rand::prelude::*;

        if engine.status().is_finished() || engine.state().pending_bombs > 0 || engine.bombs_left() == 0 {
            return None;
        }

        let size = engine.grid_size();
        let cells = engine.cells();
        let open: Vec<GridPosition> = cells
            .indexed_iter()
            .filter(|(_, cell)| cell.accepts_bomb())
            .map(|((row, col), _)| GridPosition::new(row as Coord, col as Coord))
            .collect();

        // uncovered dust means a star is within one cell
        let hinted: Vec<GridPosition> = open
            .iter()
            .copied()
            .filter(|pos| {
                pos.iter_neighbors(size).any(|neighbor| {
                    let cell = cells[neighbor.to_nd_index()];
                    cell.is_destroyed && cell.has_star_dust
                })
            })
            .collect();

        let pool = if hinted.is_empty() { &open } else { &hinted };
        pool.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_uncovered_dust() {
        let config = EngineConfig {
            auto_restart: false,
            ..EngineConfig::default()
        };
        let mut engine = RoundEngine::new(config, GameStatistics::new(), 0, Difficulty::Easy);
        let layout = Layout::from_positions(9, &[], &[GridPosition::new(2, 7)]).unwrap();
        engine.start_round_with_layout(Difficulty::Easy, layout);

        // uncovers dust at (3, 6)
        engine.place_bomb(GridPosition::new(5, 6));
        engine.run_until_idle();

        let mut player = AutoPlayer::new(1);
        let target = player.choose(&engine).unwrap();
        assert!(target.is_adjacent(GridPosition::new(3, 6)), "{target}");
        assert!(engine.cell(target).unwrap().accepts_bomb());
    }

    #[test]
    fn waits_for_pending_bomb() {
        let mut engine = RoundEngine::new(EngineConfig::default(), GameStatistics::new(), 4, Difficulty::Medium);
        let mut player = AutoPlayer::new(4);

        let target = player.choose(&engine).unwrap();
        assert_eq!(engine.place_bomb(target), PlaceOutcome::Planted);
        assert_eq!(player.choose(&engine), None);
    }
}
