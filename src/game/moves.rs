//! First-class move types and the legality engine.
//!
//! Moves are domain events, not side effects: they can be validated,
//! serialized for the authority, and replayed from an authoritative
//! reply. A capture is never its own event; it is a side effect of a
//! tiger move whose midpoint held a goat.

use super::board::Board;
use super::point::Point;
use super::types::{CellState, Side};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A single placement or movement.
///
/// `from` is absent for a goat placement during the placement phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The side whose piece moves.
    pub piece: Side,
    /// Origin intersection; `None` for a placement.
    pub from: Option<Point>,
    /// Destination intersection.
    pub to: Point,
}

impl Move {
    /// Creates a placement move (no origin).
    pub fn placement(piece: Side, to: Point) -> Self {
        Self {
            piece,
            from: None,
            to,
        }
    }

    /// Creates a movement from one intersection to another.
    pub fn movement(piece: Side, from: Point, to: Point) -> Self {
        Self {
            piece,
            from: Some(from),
            to,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.from {
            Some(from) => write!(f, "{} {} -> {}", self.piece, from, self.to),
            None => write!(f, "{} placed at {}", self.piece, self.to),
        }
    }
}

/// Error raised while validating or applying a move.
///
/// Rule violations are recovered locally: the session reports them as
/// no-ops, never panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Coordinate outside the board; treated as illegal, never a crash.
    #[display("Coordinate {} is off-board", _0)]
    OutOfBounds(Point),

    /// Destination is not in the legal set for the moving piece.
    #[display("Illegal destination {} from {}", to, from)]
    IllegalDestination {
        /// Origin of the rejected move.
        from: Point,
        /// Rejected destination.
        to: Point,
    },

    /// Placement target already holds a piece.
    #[display("Cell {} is occupied", _0)]
    Occupied(Point),

    /// No selectable piece of the acting side at this cell.
    #[display("No selectable piece at {}", _0)]
    NoPiece(Point),

    /// Event delivered while the game is over.
    #[display("Game is already over")]
    GameOver,

    /// Event delivered for the side not on move.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Side),

    /// A submission to the authority is still outstanding.
    #[display("A move submission is in flight")]
    SubmissionPending,
}

impl std::error::Error for MoveError {}

/// How a validated movement resolves on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Single-step slide into an adjacent empty cell.
    Slide,
    /// Tiger jump over an adjacent goat; the goat is captured.
    Jump {
        /// The goat removed by this jump.
        captured: Point,
    },
}

/// Computes the full set of legal destinations for `piece` at `from`.
///
/// Per direction: an empty adjacent cell is a simple destination; an
/// adjacent goat with an empty on-board cell beyond it along the same
/// line is a jump destination (tigers only). Anything else is illegal.
/// Goats never capture. The engine returns the whole set and never
/// chooses among destinations; selection belongs to the caller.
#[instrument(skip(board))]
pub fn legal_destinations(board: &Board, from: Point, piece: Side) -> Vec<Point> {
    if !from.in_bounds() || board.get(from) != piece.cell() {
        return Vec::new();
    }

    let mut destinations = Vec::new();
    for (dx, dy) in from.directions() {
        let step = from.offset(dx, dy);
        if !step.in_bounds() {
            continue;
        }
        match board.get(step) {
            CellState::Empty => destinations.push(step),
            CellState::Goat if piece == Side::Tiger => {
                let landing = step.offset(dx, dy);
                if landing.in_bounds() && board.get(landing) == CellState::Empty {
                    destinations.push(landing);
                }
            }
            _ => {}
        }
    }
    destinations
}

/// Classifies a proposed movement as a slide or a jump.
///
/// Distance is asserted explicitly: the displacement must be a straight
/// line (orthogonal, or diagonal from an even-parity origin) of exactly
/// one or two steps. Everything else is rejected outright rather than
/// relying on midpoint arithmetic to reject it by accident.
#[instrument(skip(board))]
pub fn resolve(board: &Board, from: Point, to: Point, piece: Side) -> Result<Resolution, MoveError> {
    if !from.in_bounds() {
        return Err(MoveError::OutOfBounds(from));
    }
    if !to.in_bounds() {
        return Err(MoveError::OutOfBounds(to));
    }

    let illegal = MoveError::IllegalDestination { from, to };
    if board.get(from) != piece.cell() || board.get(to) != CellState::Empty {
        return Err(illegal);
    }

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let distance = dx.abs().max(dy.abs());

    // Straight line only: each axis moves 0 or the full distance.
    if distance == 0 || distance > 2 {
        return Err(illegal);
    }
    if (dx != 0 && dx.abs() != distance) || (dy != 0 && dy.abs() != distance) {
        return Err(illegal);
    }
    // Diagonal lines only exist through even-parity intersections.
    if dx != 0 && dy != 0 && !from.has_diagonals() {
        return Err(illegal);
    }

    match distance {
        1 => Ok(Resolution::Slide),
        2 => {
            if piece != Side::Tiger {
                return Err(illegal);
            }
            let midpoint = from.offset(dx.signum(), dy.signum());
            if board.get(midpoint) != CellState::Goat {
                return Err(illegal);
            }
            Ok(Resolution::Jump { captured: midpoint })
        }
        _ => Err(illegal),
    }
}

/// Applies a validated movement: clears the origin, occupies the
/// destination, and on a jump clears the captured goat's cell.
///
/// Returns the captured goat's position, if any. Counter updates
/// belong to the session.
pub fn apply(board: &mut Board, from: Point, to: Point, piece: Side, resolution: Resolution) -> Option<Point> {
    board.set(from, CellState::Empty);
    board.set(to, piece.cell());
    match resolution {
        Resolution::Slide => None,
        Resolution::Jump { captured } => {
            board.set(captured, CellState::Empty);
            Some(captured)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(Point, CellState)]) -> Board {
        let mut board = Board::new();
        for (p, s) in cells {
            board.set(*p, *s);
        }
        board
    }

    #[test]
    fn test_destinations_never_occupied_or_off_board() {
        let board = board_with(&[
            (Point::new(0, 0), CellState::Tiger),
            (Point::new(1, 1), CellState::Tiger),
            (Point::new(0, 1), CellState::Goat),
        ]);
        for from in Point::all() {
            for piece in [Side::Tiger, Side::Goat] {
                for dest in legal_destinations(&board, from, piece) {
                    assert!(dest.in_bounds());
                    assert_eq!(board.get(dest), CellState::Empty);
                }
            }
        }
    }

    #[test]
    fn test_diagonals_only_from_even_parity() {
        let board = board_with(&[
            (Point::new(2, 2), CellState::Tiger),
            (Point::new(2, 1), CellState::Tiger),
        ]);
        let from_even = legal_destinations(&board, Point::new(2, 2), Side::Tiger);
        assert!(from_even.contains(&Point::new(1, 1)));
        assert!(from_even.contains(&Point::new(3, 3)));

        let from_odd = legal_destinations(&board, Point::new(2, 1), Side::Tiger);
        assert!(!from_odd.contains(&Point::new(1, 0)));
        assert!(!from_odd.contains(&Point::new(3, 2)));
        // Orthogonal neighbors still offered (except the occupied (2,2)).
        assert!(from_odd.contains(&Point::new(1, 1)));
        assert!(from_odd.contains(&Point::new(2, 0)));
    }

    #[test]
    fn test_jump_requires_goat_midpoint_and_empty_landing() {
        // Tiger at (2,0), goat at (2,1), empty landing (2,2).
        let board = board_with(&[
            (Point::new(2, 0), CellState::Tiger),
            (Point::new(2, 1), CellState::Goat),
        ]);
        let dests = legal_destinations(&board, Point::new(2, 0), Side::Tiger);
        assert!(dests.contains(&Point::new(2, 2)));

        // Blocked landing kills the jump.
        let blocked = board_with(&[
            (Point::new(2, 0), CellState::Tiger),
            (Point::new(2, 1), CellState::Goat),
            (Point::new(2, 2), CellState::Goat),
        ]);
        let dests = legal_destinations(&blocked, Point::new(2, 0), Side::Tiger);
        assert!(!dests.contains(&Point::new(2, 2)));

        // Landing off-board kills the jump.
        let edge = board_with(&[
            (Point::new(2, 3), CellState::Tiger),
            (Point::new(2, 4), CellState::Goat),
        ]);
        let dests = legal_destinations(&edge, Point::new(2, 3), Side::Tiger);
        assert!(!dests.iter().any(|p| !p.in_bounds()));
    }

    #[test]
    fn test_goats_never_jump() {
        let board = board_with(&[
            (Point::new(2, 0), CellState::Goat),
            (Point::new(2, 1), CellState::Goat),
        ]);
        let dests = legal_destinations(&board, Point::new(2, 0), Side::Goat);
        assert!(!dests.contains(&Point::new(2, 2)));
    }

    #[test]
    fn test_resolve_rejects_bad_distances() {
        let board = board_with(&[
            (Point::new(0, 0), CellState::Tiger),
            (Point::new(0, 1), CellState::Goat),
        ]);
        // Distance 3.
        assert!(resolve(&board, Point::new(0, 0), Point::new(0, 3), Side::Tiger).is_err());
        // Knight-like displacement.
        assert!(resolve(&board, Point::new(0, 0), Point::new(1, 2), Side::Tiger).is_err());
        // Zero displacement is not a move.
        assert!(resolve(&board, Point::new(0, 0), Point::new(0, 0), Side::Tiger).is_err());
        // The legitimate jump resolves with the midpoint capture.
        assert_eq!(
            resolve(&board, Point::new(0, 0), Point::new(0, 2), Side::Tiger),
            Ok(Resolution::Jump {
                captured: Point::new(0, 1)
            })
        );
    }

    #[test]
    fn test_resolve_rejects_diagonal_from_odd_parity() {
        let board = board_with(&[(Point::new(2, 1), CellState::Tiger)]);
        assert!(resolve(&board, Point::new(2, 1), Point::new(3, 2), Side::Tiger).is_err());
        assert!(resolve(&board, Point::new(2, 1), Point::new(2, 2), Side::Tiger).is_ok());
    }

    #[test]
    fn test_resolve_agrees_with_destination_set() {
        let board = board_with(&[
            (Point::new(2, 2), CellState::Tiger),
            (Point::new(1, 1), CellState::Goat),
            (Point::new(3, 2), CellState::Goat),
            (Point::new(4, 2), CellState::Goat),
        ]);
        let from = Point::new(2, 2);
        let dests = legal_destinations(&board, from, Side::Tiger);
        for to in Point::all() {
            let resolved = resolve(&board, from, to, Side::Tiger).is_ok();
            assert_eq!(resolved, dests.contains(&to), "disagreement at {}", to);
        }
    }

    #[test]
    fn test_idempotent_destinations() {
        let board = board_with(&[
            (Point::new(2, 2), CellState::Tiger),
            (Point::new(2, 3), CellState::Goat),
        ]);
        let first = legal_destinations(&board, Point::new(2, 2), Side::Tiger);
        let second = legal_destinations(&board, Point::new(2, 2), Side::Tiger);
        assert_eq!(first, second);
    }

    #[test]
    fn test_apply_jump_removes_exactly_one_goat() {
        let mut board = board_with(&[
            (Point::new(2, 0), CellState::Tiger),
            (Point::new(2, 1), CellState::Goat),
            (Point::new(0, 0), CellState::Goat),
        ]);
        let goats_before = board.count(CellState::Goat);
        let resolution = resolve(&board, Point::new(2, 0), Point::new(2, 2), Side::Tiger).unwrap();
        let captured = apply(&mut board, Point::new(2, 0), Point::new(2, 2), Side::Tiger, resolution);

        assert_eq!(captured, Some(Point::new(2, 1)));
        assert_eq!(board.get(Point::new(2, 0)), CellState::Empty);
        assert_eq!(board.get(Point::new(2, 1)), CellState::Empty);
        assert_eq!(board.get(Point::new(2, 2)), CellState::Tiger);
        assert_eq!(board.count(CellState::Goat), goats_before - 1);
    }
}
