//! Win evaluation.
//!
//! Runs after every placement, move, and capture. Tigers win on the
//! capture threshold; goats win by immobilizing every tiger at once.
//! The threshold check runs first and short-circuits the full-board
//! mobility scan.

use super::super::board::Board;
use super::super::moves::legal_destinations;
use super::super::types::{CAPTURE_TARGET, Side};
use tracing::instrument;

/// Checks whether every tiger on the board has an empty destination set.
///
/// A single mobile tiger is enough to keep the game going.
#[instrument(skip(board))]
pub fn all_tigers_trapped(board: &Board) -> bool {
    board
        .pieces(Side::Tiger)
        .into_iter()
        .all(|tiger| legal_destinations(board, tiger, Side::Tiger).is_empty())
}

/// Evaluates terminal conditions.
///
/// Returns the winner, or `None` while the game continues.
#[instrument(skip(board))]
pub fn evaluate(board: &Board, captured_goats: u8) -> Option<Side> {
    if captured_goats >= CAPTURE_TARGET {
        return Some(Side::Tiger);
    }
    if all_tigers_trapped(board) {
        return Some(Side::Goat);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::point::Point;
    use crate::game::types::CellState;

    fn surround_tiger(board: &mut Board, tiger: Point) {
        board.set(tiger, CellState::Tiger);
        // Fill every neighbor and every jump landing with goats.
        for (dx, dy) in tiger.directions() {
            board.set(tiger.offset(dx, dy), CellState::Goat);
            board.set(tiger.offset(2 * dx, 2 * dy), CellState::Goat);
        }
    }

    #[test]
    fn test_capture_threshold_wins_regardless_of_mobility() {
        let mut board = Board::new();
        board.set(Point::new(2, 2), CellState::Tiger);
        assert_eq!(evaluate(&board, CAPTURE_TARGET), Some(Side::Tiger));
        assert_eq!(evaluate(&board, CAPTURE_TARGET + 3), Some(Side::Tiger));
    }

    #[test]
    fn test_no_winner_while_game_open() {
        let mut board = Board::new();
        board.set(Point::new(2, 2), CellState::Tiger);
        assert_eq!(evaluate(&board, 0), None);
    }

    #[test]
    fn test_trapped_tigers_lose() {
        let mut board = Board::new();
        surround_tiger(&mut board, Point::new(0, 0));
        assert!(all_tigers_trapped(&board));
        assert_eq!(evaluate(&board, 0), Some(Side::Goat));
    }

    #[test]
    fn test_one_mobile_tiger_prevents_goat_win() {
        let mut board = Board::new();
        surround_tiger(&mut board, Point::new(0, 0));
        // A second tiger with room to move.
        board.set(Point::new(4, 4), CellState::Tiger);
        assert!(!all_tigers_trapped(&board));
        assert_eq!(evaluate(&board, 0), None);
    }

    #[test]
    fn test_blocked_slide_but_open_jump_is_mobile() {
        let mut board = Board::new();
        let tiger = Point::new(0, 0);
        board.set(tiger, CellState::Tiger);
        // Every neighbor holds a goat, but one jump landing is open.
        board.set(Point::new(1, 0), CellState::Goat);
        board.set(Point::new(0, 1), CellState::Goat);
        board.set(Point::new(1, 1), CellState::Goat);
        board.set(Point::new(0, 2), CellState::Goat);
        board.set(Point::new(2, 2), CellState::Goat);
        // Landing (2,0) stays empty: the jump over (1,0) is available.
        assert!(!all_tigers_trapped(&board));
    }
}
