//! In-process authority for offline play and deterministic tests.

use super::{GameStart, RemoteAuthority, SessionId, SessionSnapshot, StartGameConfig, WireMove};
use crate::game::{ClickOutcome, GameSession, Move, MoveError, Point, Side};
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Authority that runs sessions in-process.
///
/// Submitted moves are validated through the same engine the client
/// runs, and the reply carries a counter-move chosen by a deterministic
/// policy: the first available jump-capture in scan order, else the
/// first legal simple move (first empty cell for a goat placement).
/// All determinism lives here; the engine core never chooses.
#[derive(Debug, Default)]
pub struct LocalAuthority {
    sessions: HashMap<SessionId, GameSession>,
    next_id: u64,
}

impl LocalAuthority {
    /// Creates an authority with no sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the counter-move for the side on move, if one exists.
    fn pick_counter_move(session: &GameSession) -> Option<Move> {
        let side = session.turn();

        if side == Side::Goat && session.goats_in_hand() > 0 {
            let to = Point::all().find(|p| session.board().is_empty(*p))?;
            return Some(Move::placement(Side::Goat, to));
        }

        let mut first_simple = None;
        for piece in session.board().pieces(side) {
            for dest in session.legal_destinations(piece) {
                let distance = (dest.x - piece.x).abs().max((dest.y - piece.y).abs());
                if distance == 2 {
                    // Jump-captures take priority.
                    return Some(Move::movement(side, piece, dest));
                }
                if first_simple.is_none() {
                    first_simple = Some(Move::movement(side, piece, dest));
                }
            }
        }
        first_simple
    }

    /// Drives a move through a server-side session's state machine.
    fn apply_move(session: &mut GameSession, action: Move) -> Result<()> {
        if action.piece != session.turn() {
            bail!(MoveError::NotYourTurn(action.piece));
        }

        if let Some(from) = action.from {
            match session.handle_click(from) {
                ClickOutcome::Selected(_) => {}
                outcome => bail!("Cannot select {}: {:?}", from, outcome),
            }
        }

        match session.handle_click(action.to) {
            ClickOutcome::Placed(_) | ClickOutcome::Moved { .. } => Ok(()),
            ClickOutcome::Ignored(err) => bail!("Illegal move: {}", err),
            outcome => bail!("Move did not complete: {:?}", outcome),
        }
    }
}

#[async_trait::async_trait]
impl RemoteAuthority for LocalAuthority {
    #[instrument(skip(self, config))]
    async fn start_game(&mut self, config: &StartGameConfig) -> Result<GameStart> {
        self.next_id += 1;
        let id = format!("local-{}", self.next_id);

        let session = GameSession::new();
        let state = session.snapshot();
        self.sessions.insert(id.clone(), session);

        info!(session_id = %id, player_id = %config.player_id, "Started local session");
        Ok(GameStart { id, state })
    }

    #[instrument(skip(self, action))]
    async fn submit_move(&mut self, session_id: &str, action: &WireMove) -> Result<SessionSnapshot> {
        let session = self
            .sessions
            .get_mut(session_id)
            .with_context(|| format!("Unknown session: {}", session_id))?;

        Self::apply_move(session, Move::from(*action))?;
        debug!(?action, "Applied submitted move");

        // Snapshot before the counter-move: the client replays
        // `last_move` against this board itself.
        let mut snapshot = session.snapshot();
        if session.is_over() {
            return Ok(snapshot);
        }

        match Self::pick_counter_move(session) {
            Some(counter) => {
                Self::apply_move(session, counter)
                    .context("Counter-move rejected by engine")?;
                debug!(%counter, "Chose counter-move");
                snapshot.last_move = Some(WireMove::from(counter));
            }
            None => warn!("No counter-move available"),
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CellState;

    #[tokio::test]
    async fn test_start_and_submit_round_trip() {
        let mut authority = LocalAuthority::new();
        let start = authority
            .start_game(&StartGameConfig::default())
            .await
            .unwrap();
        assert_eq!(start.state.goats_in_hand, 20);
        assert_eq!(start.state.side_to_move, Side::Goat);

        let placement = WireMove::from(Move::placement(Side::Goat, Point::new(2, 2)));
        let snapshot = authority.submit_move(&start.id, &placement).await.unwrap();

        // Board reflects the placement but not the counter-move.
        assert_eq!(snapshot.board[2][2], CellState::Goat);
        assert_eq!(snapshot.goats_in_hand, 19);
        assert_eq!(snapshot.side_to_move, Side::Tiger);
        let counter = snapshot.last_move.expect("tiger counter-move");
        assert_eq!(counter.piece_type, Side::Tiger);
        assert_eq!(snapshot.board[counter.to.y as usize][counter.to.x as usize], CellState::Empty);
    }

    #[tokio::test]
    async fn test_illegal_submission_rejected() {
        let mut authority = LocalAuthority::new();
        let start = authority
            .start_game(&StartGameConfig::default())
            .await
            .unwrap();

        // Corner already holds a tiger.
        let placement = WireMove::from(Move::placement(Side::Goat, Point::new(0, 0)));
        assert!(authority.submit_move(&start.id, &placement).await.is_err());

        // Out-of-turn tiger move.
        let tiger = WireMove::from(Move::movement(Side::Tiger, Point::new(0, 0), Point::new(1, 1)));
        assert!(authority.submit_move(&start.id, &tiger).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_session_rejected() {
        let mut authority = LocalAuthority::new();
        let placement = WireMove::from(Move::placement(Side::Goat, Point::new(2, 2)));
        assert!(authority.submit_move("missing", &placement).await.is_err());
    }

    #[tokio::test]
    async fn test_counter_move_prefers_capture() {
        let mut authority = LocalAuthority::new();
        let start = authority
            .start_game(&StartGameConfig::default())
            .await
            .unwrap();

        // A goat adjacent to the (0,0) tiger invites the jump.
        let placement = WireMove::from(Move::placement(Side::Goat, Point::new(0, 1)));
        let snapshot = authority.submit_move(&start.id, &placement).await.unwrap();

        let counter = snapshot.last_move.expect("tiger counter-move");
        assert_eq!(counter.from, Some(Point::new(0, 0)));
        assert_eq!(counter.to, Point::new(0, 2));
    }
}
