use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid size and positions.
pub type Coord = u8;

/// Count type used for stars, rocks, bombs and total-cell counts.
pub type CellCount = u16;

/// Cell on the grid, addressed as `(row, col)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: Coord,
    pub col: Coord,
}

impl GridPosition {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    pub const fn is_within(self, size: Coord) -> bool {
        self.row < size && self.col < size
    }

    /// King-move adjacency, a cell counts as adjacent to itself.
    pub const fn is_adjacent(self, other: GridPosition) -> bool {
        chebyshev_distance(self, other) <= 1
    }

    pub fn iter_neighbors(self, size: Coord) -> NeighborIter {
        NeighborIter::new(self, size)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for GridPosition {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub const fn chebyshev_distance(a: GridPosition, b: GridPosition) -> Coord {
    let rows = a.row.abs_diff(b.row);
    let cols = a.col.abs_diff(b.col);
    if rows > cols { rows } else { cols }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `position`, returning a value only when it remains in bounds.
fn apply_delta(position: GridPosition, (dr, dc): (i8, i8), size: Coord) -> Option<GridPosition> {
    let row = position.row.checked_add_signed(dr)?;
    if row >= size {
        return None;
    }

    let col = position.col.checked_add_signed(dc)?;
    if col >= size {
        return None;
    }

    Some(GridPosition::new(row, col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: GridPosition,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    fn new(center: GridPosition, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = GridPosition;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.size);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// Cardinal direction of a blast arm.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Left, Self::Right, Self::Down];

    pub const fn delta(self) -> (i8, i8) {
        use Direction::*;
        match self {
            Up => (-1, 0),
            Left => (0, -1),
            Right => (0, 1),
            Down => (1, 0),
        }
    }

    /// Position `distance` cells away from `origin`, `None` once it leaves the grid.
    pub fn step(self, origin: GridPosition, distance: u8, size: Coord) -> Option<GridPosition> {
        let (dr, dc) = self.delta();
        let distance = i8::try_from(distance).ok()?;
        apply_delta(origin, (dr.checked_mul(distance)?, dc.checked_mul(distance)?), size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighbors_are_clipped_at_corners() {
        let corner: Vec<_> = GridPosition::new(0, 0).iter_neighbors(9).collect();
        assert_eq!(
            corner,
            [
                GridPosition::new(0, 1),
                GridPosition::new(1, 0),
                GridPosition::new(1, 1)
            ]
        );

        assert_eq!(GridPosition::new(4, 4).iter_neighbors(9).count(), 8);
        assert_eq!(GridPosition::new(8, 4).iter_neighbors(9).count(), 5);
    }

    #[test]
    fn chebyshev_distance_is_king_moves() {
        let a = GridPosition::new(3, 3);
        assert_eq!(chebyshev_distance(a, a), 0);
        assert_eq!(chebyshev_distance(a, GridPosition::new(4, 2)), 1);
        assert_eq!(chebyshev_distance(a, GridPosition::new(5, 4)), 2);
        assert!(a.is_adjacent(GridPosition::new(2, 4)));
        assert!(!a.is_adjacent(GridPosition::new(3, 5)));
    }

    #[test]
    fn direction_step_stops_at_edges() {
        let origin = GridPosition::new(1, 7);
        assert_eq!(Direction::Up.step(origin, 1, 9), Some(GridPosition::new(0, 7)));
        assert_eq!(Direction::Up.step(origin, 2, 9), None);
        assert_eq!(Direction::Right.step(origin, 1, 9), Some(GridPosition::new(1, 8)));
        assert_eq!(Direction::Right.step(origin, 2, 9), None);
        assert_eq!(Direction::Down.step(origin, 2, 9), Some(GridPosition::new(3, 7)));
        assert_eq!(Direction::Left.step(origin, 2, 9), Some(GridPosition::new(1, 5)));
    }
}
