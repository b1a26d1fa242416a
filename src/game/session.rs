//! Game session and turn state machine.
//!
//! A session owns exactly one board, the side to move, the transient
//! selection, both goat counters, and the terminal flag. It is mutated
//! only through [`GameSession::handle_click`], which classifies each
//! incoming coordinate as a placement, a selection, or a movement and
//! drives the renderer collaborator after every accepted transition.

use super::board::Board;
use super::moves::{self, Move, MoveError};
use super::point::Point;
use super::rules;
use super::types::{CellState, GOAT_SUPPLY, Side};
use crate::authority::SessionSnapshot;
use crate::render::{NullRenderer, Renderer};
use tracing::{debug, info, instrument};

/// Starting intersections for the four tigers.
const TIGER_STARTS: [Point; 4] = [
    Point::new(0, 0),
    Point::new(4, 0),
    Point::new(0, 4),
    Point::new(4, 4),
];

/// Observable state of the turn machine.
///
/// Derived from the session rather than stored: the goat side uses the
/// same selection pattern as tigers once its hand is empty, so
/// `AwaitingGoatAction` covers both placement and goat movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Goat side to act: place from hand, or select-then-slide.
    AwaitingGoatAction,
    /// Tiger side to act, no tiger armed yet.
    AwaitingTigerSelection,
    /// A tiger is armed and waiting for a destination.
    AwaitingTigerDestination,
    /// Terminal; no further transitions are accepted.
    GameOver,
}

/// What a delivered click did to the session.
///
/// Rule violations come back as `Ignored`: a no-op report, not an
/// error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A goat was placed from hand.
    Placed(Move),
    /// A piece was armed (or re-armed) for movement.
    Selected(Point),
    /// An armed piece completed a move, possibly capturing a goat.
    Moved {
        /// The completed move.
        action: Move,
        /// Captured goat's cell, if the move was a jump.
        captured: Option<Point>,
    },
    /// The click changed nothing.
    Ignored(MoveError),
}

impl ClickOutcome {
    /// Whether the click mutated the session.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, ClickOutcome::Ignored(_))
    }

    /// The completed move, if this click finished one.
    pub fn completed_move(&self) -> Option<Move> {
        match self {
            ClickOutcome::Placed(action) => Some(*action),
            ClickOutcome::Moved { action, .. } => Some(*action),
            _ => None,
        }
    }
}

/// A single game of Bagh Chal.
///
/// Fresh sessions start with the four tigers on the corner
/// intersections, twenty goats in hand, and the goat side to move.
pub struct GameSession {
    board: Board,
    turn: Side,
    selected: Option<Point>,
    goats_in_hand: u8,
    captured_goats: u8,
    over: bool,
    winner: Option<Side>,
    history: Vec<Move>,
    renderer: Box<dyn Renderer>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("turn", &self.turn)
            .field("selected", &self.selected)
            .field("goats_in_hand", &self.goats_in_hand)
            .field("captured_goats", &self.captured_goats)
            .field("over", &self.over)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates a headless session.
    pub fn new() -> Self {
        Self::with_renderer(Box::new(NullRenderer))
    }

    /// Creates a session wired to a renderer collaborator.
    #[instrument(skip(renderer))]
    pub fn with_renderer(renderer: Box<dyn Renderer>) -> Self {
        let mut board = Board::new();
        for corner in TIGER_STARTS {
            board.set(corner, CellState::Tiger);
        }

        let mut session = Self {
            board,
            turn: Side::Goat,
            selected: None,
            goats_in_hand: GOAT_SUPPLY,
            captured_goats: 0,
            over: false,
            winner: None,
            history: Vec::new(),
            renderer,
        };

        info!("Created new game session");
        for p in Point::all() {
            session.renderer.set_piece(p, session.board.get(p));
        }
        session.refresh_highlights();
        session
    }

    /// Handles one externally delivered coordinate.
    ///
    /// Classification depends on the side to move and the selection:
    /// goat clicks place from hand (or select-then-slide once the hand
    /// is empty); tiger clicks arm a tiger and then pick a destination.
    /// Anything that violates the rules is reported as `Ignored` with
    /// no state change beyond the selection rules of the transition.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn handle_click(&mut self, p: Point) -> ClickOutcome {
        if self.over {
            debug!(%p, "Click after game over ignored");
            return ClickOutcome::Ignored(MoveError::GameOver);
        }
        if !p.in_bounds() {
            debug!(%p, "Off-board click ignored");
            return ClickOutcome::Ignored(MoveError::OutOfBounds(p));
        }

        match self.turn {
            Side::Goat if self.goats_in_hand > 0 => self.place_goat(p),
            side => self.movement_click(p, side),
        }
    }

    fn place_goat(&mut self, p: Point) -> ClickOutcome {
        if !self.board.is_empty(p) {
            debug!(%p, "Placement on occupied cell ignored");
            return ClickOutcome::Ignored(MoveError::Occupied(p));
        }

        self.board.set(p, CellState::Goat);
        self.goats_in_hand -= 1;
        self.renderer.set_piece(p, CellState::Goat);

        let action = Move::placement(Side::Goat, p);
        self.history.push(action);
        info!(%action, goats_in_hand = self.goats_in_hand, "Goat placed");

        self.finish_turn();
        ClickOutcome::Placed(action)
    }

    fn movement_click(&mut self, p: Point, side: Side) -> ClickOutcome {
        let Some(from) = self.selected else {
            return self.select(p, side);
        };

        // Clicking another own piece re-arms selection instead.
        if self.board.get(p) == side.cell() {
            return self.select(p, side);
        }

        match moves::resolve(&self.board, from, p, side) {
            Ok(resolution) => {
                let captured = moves::apply(&mut self.board, from, p, side, resolution);
                if let Some(goat) = captured {
                    self.captured_goats += 1;
                    self.renderer.set_piece(goat, CellState::Empty);
                    info!(%goat, captured_goats = self.captured_goats, "Goat captured");
                }
                self.renderer.set_piece(from, CellState::Empty);
                self.renderer.set_piece(p, side.cell());

                let action = Move::movement(side, from, p);
                self.history.push(action);
                info!(%action, "Move executed");

                self.finish_turn();
                ClickOutcome::Moved { action, captured }
            }
            Err(err) => {
                // Illegal destination: no mutation, selection cleared.
                debug!(%from, to = %p, %err, "Illegal destination, selection cleared");
                self.selected = None;
                self.refresh_highlights();
                ClickOutcome::Ignored(err)
            }
        }
    }

    fn select(&mut self, p: Point, side: Side) -> ClickOutcome {
        if self.board.get(p) != side.cell() {
            debug!(%p, %side, "Nothing selectable here");
            return ClickOutcome::Ignored(MoveError::NoPiece(p));
        }
        self.selected = Some(p);
        debug!(%p, %side, "Piece armed");
        self.refresh_highlights();
        ClickOutcome::Selected(p)
    }

    /// Win evaluation and turn handoff after any accepted mutation.
    fn finish_turn(&mut self) {
        self.selected = None;
        if let Some(winner) = rules::evaluate(&self.board, self.captured_goats) {
            self.over = true;
            self.winner = Some(winner);
            info!(%winner, "Game over");
            self.renderer.clear_highlights();
        } else {
            self.turn = self.turn.opponent();
            self.refresh_highlights();
        }
    }

    /// Repaints the highlight set for the current state.
    ///
    /// Placement highlights every empty cell, an unarmed movement turn
    /// highlights that side's pieces, and an armed piece highlights its
    /// legal destinations.
    fn refresh_highlights(&mut self) {
        self.renderer.clear_highlights();
        if self.over {
            return;
        }

        if let Some(from) = self.selected {
            for dest in moves::legal_destinations(&self.board, from, self.turn) {
                self.renderer.set_highlight(dest, true);
            }
            return;
        }

        let target = match self.turn {
            Side::Goat if self.goats_in_hand > 0 => CellState::Empty,
            side => side.cell(),
        };
        for p in Point::all() {
            if self.board.get(p) == target {
                self.renderer.set_highlight(p, true);
            }
        }
    }

    /// Legal destinations for the piece at `from`, if any.
    pub fn legal_destinations(&self, from: Point) -> Vec<Point> {
        match self.board.get(from).side() {
            Some(side) => moves::legal_destinations(&self.board, from, side),
            None => Vec::new(),
        }
    }

    /// Snapshots the session in the authority's wire shape.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: *self.board.cells(),
            goats_in_hand: self.goats_in_hand,
            captured_goats: self.captured_goats,
            side_to_move: self.turn,
            is_game_over: self.over,
            winner: self.winner,
            last_move: None,
        }
    }

    /// Replaces session state wholesale with an authoritative snapshot.
    ///
    /// The authoritative state supersedes any local prediction; no
    /// cell-by-cell merge is attempted. Selection is dropped, every
    /// piece is repainted, and highlights are rebuilt for the new turn.
    #[instrument(skip(self, snapshot))]
    pub fn adopt_snapshot(&mut self, snapshot: &SessionSnapshot) {
        self.board = Board::from_cells(snapshot.board);
        self.goats_in_hand = snapshot.goats_in_hand;
        self.captured_goats = snapshot.captured_goats;
        self.turn = snapshot.side_to_move;
        self.over = snapshot.is_game_over;
        self.winner = snapshot.winner;
        self.selected = None;

        info!(
            turn = %self.turn,
            goats_in_hand = self.goats_in_hand,
            captured_goats = self.captured_goats,
            over = self.over,
            "Adopted authoritative state"
        );

        for p in Point::all() {
            self.renderer.set_piece(p, self.board.get(p));
        }
        self.refresh_highlights();
    }

    /// Derived state of the turn machine.
    pub fn state(&self) -> TurnState {
        if self.over {
            TurnState::GameOver
        } else if self.turn == Side::Goat {
            TurnState::AwaitingGoatAction
        } else if self.selected.is_some() {
            TurnState::AwaitingTigerDestination
        } else {
            TurnState::AwaitingTigerSelection
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// The armed piece, if any.
    pub fn selected(&self) -> Option<Point> {
        self.selected
    }

    /// Goats still in hand.
    pub fn goats_in_hand(&self) -> u8 {
        self.goats_in_hand
    }

    /// Goats captured so far.
    pub fn captured_goats(&self) -> u8 {
        self.captured_goats
    }

    /// Whether the session is terminal.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// The winner, once terminal.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Accepted moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
