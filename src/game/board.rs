//! 5×5 board storage.

use super::point::Point;
use super::types::{CellState, GRID_SIZE, Side};
use serde::{Deserialize, Serialize};

/// The 5×5 grid of intersections, stored row-major (`cells[y][x]`).
///
/// Off-board reads answer `Empty` and off-board writes are dropped;
/// coordinates outside the grid are "off-board", not an error. Callers
/// bounds-check before treating a neighbor as legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[CellState; GRID_SIZE as usize]; GRID_SIZE as usize],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[CellState::Empty; GRID_SIZE as usize]; GRID_SIZE as usize],
        }
    }

    /// Builds a board from raw row-major cells (authority snapshots).
    pub fn from_cells(cells: [[CellState; GRID_SIZE as usize]; GRID_SIZE as usize]) -> Self {
        Self { cells }
    }

    /// Returns the raw row-major cells.
    pub fn cells(&self) -> &[[CellState; GRID_SIZE as usize]; GRID_SIZE as usize] {
        &self.cells
    }

    /// Gets the state at `p`, or `Empty` if `p` is off-board.
    pub fn get(&self, p: Point) -> CellState {
        if !p.in_bounds() {
            return CellState::Empty;
        }
        self.cells[p.y as usize][p.x as usize]
    }

    /// Sets the state at `p`. Off-board writes are dropped.
    pub fn set(&mut self, p: Point, state: CellState) {
        if p.in_bounds() {
            self.cells[p.y as usize][p.x as usize] = state;
        }
    }

    /// Whether `p` is on-board and unoccupied.
    pub fn is_empty(&self, p: Point) -> bool {
        p.in_bounds() && self.get(p) == CellState::Empty
    }

    /// In-bounds neighbors of `p`: orthogonal always, diagonal only
    /// from even-parity intersections.
    pub fn neighbors(&self, p: Point) -> Vec<Point> {
        p.directions()
            .into_iter()
            .map(|(dx, dy)| p.offset(dx, dy))
            .filter(|n| n.in_bounds())
            .collect()
    }

    /// Positions of all pieces belonging to `side`, in scan order.
    pub fn pieces(&self, side: Side) -> Vec<Point> {
        Point::all().filter(|p| self.get(*p) == side.cell()).collect()
    }

    /// Number of cells holding `state`.
    pub fn count(&self, state: CellState) -> usize {
        Point::all().filter(|p| self.get(*p) == state).count()
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let symbol = match self.get(Point::new(x, y)) {
                    CellState::Empty => '.',
                    CellState::Tiger => 'T',
                    CellState::Goat => 'G',
                };
                result.push(symbol);
                if x < GRID_SIZE - 1 {
                    result.push(' ');
                }
            }
            if y < GRID_SIZE - 1 {
                result.push('\n');
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_board_reads_empty() {
        let board = Board::new();
        assert_eq!(board.get(Point::new(-1, 0)), CellState::Empty);
        assert_eq!(board.get(Point::new(0, 5)), CellState::Empty);
    }

    #[test]
    fn test_off_board_writes_dropped() {
        let mut board = Board::new();
        board.set(Point::new(5, 5), CellState::Tiger);
        assert_eq!(board.count(CellState::Tiger), 0);
    }

    #[test]
    fn test_neighbor_counts_by_parity() {
        let board = Board::new();
        // Corner (even parity): 2 orthogonal + 1 diagonal.
        assert_eq!(board.neighbors(Point::new(0, 0)).len(), 3);
        // Edge midpoint (odd parity): orthogonals only.
        assert_eq!(board.neighbors(Point::new(1, 0)).len(), 3);
        // Center (even parity): all 8.
        assert_eq!(board.neighbors(Point::new(2, 2)).len(), 8);
        // Interior odd-parity point: 4 orthogonals.
        assert_eq!(board.neighbors(Point::new(2, 1)).len(), 4);
    }

    #[test]
    fn test_pieces_scan_order() {
        let mut board = Board::new();
        board.set(Point::new(3, 1), CellState::Goat);
        board.set(Point::new(1, 0), CellState::Goat);
        assert_eq!(
            board.pieces(Side::Goat),
            vec![Point::new(1, 0), Point::new(3, 1)]
        );
    }
}
