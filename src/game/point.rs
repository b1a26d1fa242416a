//! Board coordinates and direction vectors.
//!
//! A `Point` is an intersection on the 5×5 board. Which of the eight
//! neighbor directions exist from a point depends on its parity: the
//! physical board only prints diagonal lines through intersections
//! where `x + y` is even.

use super::types::GRID_SIZE;
use serde::{Deserialize, Serialize};

/// The four orthogonal direction vectors, available from every point.
pub const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// The four diagonal direction vectors, available from even-parity points.
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// An intersection on the board, `(x, y)` with `0 ≤ x, y < 5`.
///
/// Points are plain data; arithmetic helpers may produce off-board
/// coordinates, so callers check `in_bounds` before treating a
/// neighbor as real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column, increasing rightward.
    pub x: i8,
    /// Row, increasing downward.
    pub y: i8,
}

impl Point {
    /// Creates a point. No bounds check; see `in_bounds`.
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Whether this point lies on the board.
    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < GRID_SIZE && self.y >= 0 && self.y < GRID_SIZE
    }

    /// The point displaced by `(dx, dy)`. May be off-board.
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether diagonal lines pass through this intersection.
    pub fn has_diagonals(self) -> bool {
        (self.x + self.y) % 2 == 0
    }

    /// Direction vectors leaving this point: orthogonals always,
    /// diagonals only on even parity.
    pub fn directions(self) -> Vec<(i8, i8)> {
        let mut dirs = ORTHOGONALS.to_vec();
        if self.has_diagonals() {
            dirs.extend_from_slice(&DIAGONALS);
        }
        dirs
    }

    /// All on-board points in row-major scan order.
    pub fn all() -> impl Iterator<Item = Point> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Point::new(x, y)))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_gates_diagonals() {
        assert!(Point::new(0, 0).has_diagonals());
        assert!(!Point::new(0, 1).has_diagonals());
        assert!(Point::new(2, 2).has_diagonals());
        assert!(!Point::new(3, 2).has_diagonals());
    }

    #[test]
    fn test_direction_counts() {
        assert_eq!(Point::new(0, 0).directions().len(), 8);
        assert_eq!(Point::new(1, 0).directions().len(), 4);
    }

    #[test]
    fn test_bounds() {
        assert!(Point::new(0, 0).in_bounds());
        assert!(Point::new(4, 4).in_bounds());
        assert!(!Point::new(5, 0).in_bounds());
        assert!(!Point::new(0, -1).in_bounds());
    }

    #[test]
    fn test_scan_order_covers_board() {
        let all: Vec<_> = Point::all().collect();
        assert_eq!(all.len(), 25);
        assert_eq!(all[0], Point::new(0, 0));
        assert_eq!(all[24], Point::new(4, 4));
    }
}
