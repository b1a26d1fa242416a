//! Remote authority collaborator seam.
//!
//! The engine predicts moves locally and defers to an authority (a
//! remote game server, or an in-process stand-in) for ground truth.
//! Wire shapes mirror the authority's JSON API: camelCase fields, board
//! cells and sides encoded as integers (0 empty, 1 tiger, 2 goat).

mod local;
mod rest;

pub use local::LocalAuthority;
pub use rest::RestAuthority;

use crate::game::{CellState, GRID_SIZE, Move, Point, Side};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Unique identifier for a game session on the authority.
pub type SessionId = String;

/// A move in the authority's wire shape.
///
/// `from` is absent for a goat placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMove {
    /// The moving side's piece code.
    pub piece_type: Side,
    /// Origin, absent for placements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Point>,
    /// Destination.
    pub to: Point,
}

impl From<Move> for WireMove {
    fn from(action: Move) -> Self {
        Self {
            piece_type: action.piece,
            from: action.from,
            to: action.to,
        }
    }
}

impl From<WireMove> for Move {
    fn from(wire: WireMove) -> Self {
        Self {
            piece: wire.piece_type,
            from: wire.from,
            to: wire.to,
        }
    }
}

/// Full authoritative session state.
///
/// Supersedes any local prediction wholesale. `last_move`, when
/// present, describes a move the authority additionally made on behalf
/// of an autonomous opponent; it is not yet folded into `board` and is
/// replayed locally through the turn state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Row-major board cells.
    pub board: [[CellState; GRID_SIZE as usize]; GRID_SIZE as usize],
    /// Goats not yet placed.
    pub goats_in_hand: u8,
    /// Goats captured so far.
    pub captured_goats: u8,
    /// Side to move.
    #[serde(rename = "currentTurn")]
    pub side_to_move: Side,
    /// Whether the game has ended.
    pub is_game_over: bool,
    /// The winner, once terminal.
    pub winner: Option<Side>,
    /// Autonomous-opponent move to replay, if any.
    pub last_move: Option<WireMove>,
}

/// Configuration for starting a game on the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameConfig {
    /// Caller's player identifier.
    pub player_id: String,
    /// Whether the authority should run the opposing side.
    pub is_ai_game: bool,
    /// Opponent strength, authority-defined.
    pub ai_level: u8,
}

impl Default for StartGameConfig {
    fn default() -> Self {
        Self {
            player_id: "player".to_string(),
            is_ai_game: true,
            ai_level: 2,
        }
    }
}

/// A freshly started game: its session id plus initial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStart {
    /// Session id for subsequent submissions.
    pub id: SessionId,
    /// Initial authoritative state.
    pub state: SessionSnapshot,
}

/// The authority the engine reconciles against.
///
/// Only communication failures propagate as errors; they represent
/// loss of ground truth, not a rule violation.
#[async_trait::async_trait]
pub trait RemoteAuthority: Send {
    /// Starts a new game session.
    async fn start_game(&mut self, config: &StartGameConfig) -> Result<GameStart>;

    /// Submits a move and returns the resulting authoritative state.
    async fn submit_move(&mut self, session_id: &str, action: &WireMove) -> Result<SessionSnapshot>;
}
