use alloc::vec::Vec;
use hashbrown::HashSet;
use ndarray::Array2;

use crate::*;

/// Rock and star placement of a single round, independent of any play state.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    size: Coord,
    rocks: HashSet<GridPosition>,
    stars: HashSet<GridPosition>,
}

impl Layout {
    pub fn empty(size: Coord) -> Self {
        Self {
            size,
            rocks: HashSet::new(),
            stars: HashSet::new(),
        }
    }

    pub(crate) fn from_sets_unchecked(
        size: Coord,
        rocks: HashSet<GridPosition>,
        stars: HashSet<GridPosition>,
    ) -> Self {
        Self { size, rocks, stars }
    }

    /// Builds an explicit layout. Spacing between rocks or stars is not enforced, only bounds and that no star sits
    /// on a rock.
    pub fn from_positions(size: Coord, rocks: &[GridPosition], stars: &[GridPosition]) -> Result<Self> {
        let mut layout = Self::empty(size);

        for &rock in rocks {
            layout.rocks.insert(layout.validate_position(rock)?);
        }

        for &star in stars {
            let star = layout.validate_position(star)?;
            if layout.rocks.contains(&star) {
                return Err(GameError::OverlappingCells);
            }
            layout.stars.insert(star);
        }

        Ok(layout)
    }

    pub fn validate_position(&self, position: GridPosition) -> Result<GridPosition> {
        if position.is_within(self.size) {
            Ok(position)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn rocks(&self) -> &HashSet<GridPosition> {
        &self.rocks
    }

    pub fn stars(&self) -> &HashSet<GridPosition> {
        &self.stars
    }

    pub fn rock_count(&self) -> CellCount {
        self.rocks.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn star_count(&self) -> CellCount {
        self.stars.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn has_rock(&self, position: GridPosition) -> bool {
        self.rocks.contains(&position)
    }

    pub fn has_star(&self, position: GridPosition) -> bool {
        self.stars.contains(&position)
    }

    /// Same positions re-homed on a grid of `size`, dropping whatever falls outside of it.
    pub fn clamped_to(&self, size: Coord) -> Self {
        let keep = |position: &&GridPosition| position.is_within(size);
        Self {
            size,
            rocks: self.rocks.iter().filter(keep).copied().collect(),
            stars: self.stars.iter().filter(keep).copied().collect(),
        }
    }

    /// Cells that get star dust: every in-bounds neighbor of a star that is not itself a rock or a star.
    pub fn star_dust(&self) -> HashSet<GridPosition> {
        self.stars
            .iter()
            .flat_map(|star| star.iter_neighbors(self.size))
            .filter(|&pos| !self.has_rock(pos) && !self.has_star(pos))
            .collect()
    }

    /// Fresh grid with the derived per-cell flags of this layout.
    pub fn to_grid(&self) -> Array2<CellState> {
        let size = usize::from(self.size);
        let mut grid: Array2<CellState> = Array2::default((size, size));

        for &rock in &self.rocks {
            grid[rock.to_nd_index()] = CellState::rock();
        }
        for &star in &self.stars {
            grid[star.to_nd_index()] = CellState::star();
        }
        for dust in self.star_dust() {
            grid[dust.to_nd_index()].has_star_dust = true;
        }

        grid
    }

    pub fn sorted_stars(&self) -> Vec<GridPosition> {
        let mut stars: Vec<_> = self.stars.iter().copied().collect();
        stars.sort_unstable();
        stars
    }
}
