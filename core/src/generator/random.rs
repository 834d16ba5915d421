use hashbrown::HashSet;
use rand::rngs::SmallRng;

use super::*;

/// Rejection sampling generator: rocks first, then stars, each kept at least two cells apart from their own kind.
///
/// Every sample counts against `attempts`, whether accepted or not. When the budget runs out the layout is returned
/// with whatever was placed so far, the round stays playable with fewer rocks or stars.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    attempts: u32,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_attempts(seed, DEFAULT_PLACEMENT_ATTEMPTS)
    }

    pub fn with_attempts(seed: u64, attempts: u32) -> Self {
        Self { seed, attempts }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, params: DifficultyParams) -> Layout {
        use rand::prelude::*;

        let size = params.grid_size;
        if size == 0 {
            log::warn!("Empty grid requested, nothing to place");
            return Layout::empty(size);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut rocks: HashSet<GridPosition> = HashSet::new();
        let mut attempts = 0;
        while rocks.len() < usize::from(params.total_rocks) && attempts < self.attempts {
            attempts += 1;
            let candidate = random_position(&mut rng, size);
            if rocks.iter().any(|&rock| rock.is_adjacent(candidate)) {
                continue;
            }
            rocks.insert(candidate);
        }

        let mut stars: HashSet<GridPosition> = HashSet::new();
        let mut attempts = 0;
        while stars.len() < usize::from(params.total_stars) && attempts < self.attempts {
            attempts += 1;
            let candidate = random_position(&mut rng, size);
            if rocks.contains(&candidate) {
                continue;
            }
            if stars.iter().any(|&star| star.is_adjacent(candidate)) {
                continue;
            }
            stars.insert(candidate);
        }

        let layout = Layout::from_sets_unchecked(size, rocks, stars);

        // fewer than requested is accepted, the round goes on with what fits
        if layout.rock_count() != params.total_rocks {
            log::warn!(
                "Placed fewer rocks than requested, actual: {}, requested: {}",
                layout.rock_count(),
                params.total_rocks
            );
        }
        if layout.star_count() != params.total_stars {
            log::warn!(
                "Placed fewer stars than requested, actual: {}, requested: {}",
                layout.star_count(),
                params.total_stars
            );
        }

        layout
    }
}

fn random_position(rng: &mut SmallRng, size: Coord) -> GridPosition {
    use rand::prelude::*;

    GridPosition::new(rng.random_range(0..size), rng.random_range(0..size))
}
