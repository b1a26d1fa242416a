//! Reconciliation between local prediction and the remote authority.
//!
//! The session applies every move optimistically so the UI reacts with
//! no perceived latency; the authority's reply then replaces local
//! state wholesale. If the reply carries an autonomous-opponent
//! counter-move, it is replayed through the turn state machine exactly
//! as if a human had clicked it, so selection and highlight state stay
//! consistent without a second round trip.

use crate::authority::{RemoteAuthority, SessionId, StartGameConfig, WireMove};
use crate::game::{ClickOutcome, GameSession, MoveError, Point};
use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

/// Coordinates one session against one authority.
///
/// While a submission is outstanding the session is treated as
/// exclusively locked: move-initiating clicks in that window are
/// ignored, never interleaved with the unresolved reply.
pub struct Reconciler {
    session: GameSession,
    authority: Box<dyn RemoteAuthority>,
    session_id: Option<SessionId>,
    in_flight: bool,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("session", &self.session)
            .field("session_id", &self.session_id)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    /// Pairs a session with an authority. No game is started yet.
    pub fn new(session: GameSession, authority: Box<dyn RemoteAuthority>) -> Self {
        Self {
            session,
            authority,
            session_id: None,
            in_flight: false,
        }
    }

    /// Starts a game on the authority and adopts its initial state.
    #[instrument(skip_all)]
    pub async fn start(&mut self, config: &StartGameConfig) -> Result<()> {
        let start = self
            .authority
            .start_game(config)
            .await
            .context("Could not start game on authority")?;

        info!(session_id = %start.id, "Authority session started");
        self.session.adopt_snapshot(&start.state);
        self.session_id = Some(start.id);
        Ok(())
    }

    /// Handles a click, submitting any completed move to the authority.
    ///
    /// The move is applied locally first (optimistic execution). On a
    /// successful reply the authoritative state replaces the local
    /// prediction and any opponent counter-move is replayed. On
    /// failure the optimistic state is retained (no rollback) and
    /// the error is surfaced for user-visible messaging; the session
    /// stays usable until the next successful submission.
    #[instrument(skip(self))]
    pub async fn handle_click(&mut self, p: Point) -> Result<ClickOutcome> {
        if self.in_flight {
            debug!(%p, "Click during outstanding submission ignored");
            return Ok(ClickOutcome::Ignored(MoveError::SubmissionPending));
        }

        let outcome = self.session.handle_click(p);
        let Some(action) = outcome.completed_move() else {
            return Ok(outcome);
        };

        let Some(session_id) = self.session_id.clone() else {
            // No authority session: purely local play.
            return Ok(outcome);
        };

        self.in_flight = true;
        let wire = WireMove::from(action);
        let reply = self.authority.submit_move(&session_id, &wire).await;
        self.in_flight = false;

        let snapshot = reply.context("Authority unavailable; keeping optimistic state")?;
        self.session.adopt_snapshot(&snapshot);

        if let Some(counter) = snapshot.last_move {
            self.replay(counter);
        }

        Ok(outcome)
    }

    /// Replays an authority-made move through the state machine,
    /// select-then-destination for a movement, direct placement
    /// otherwise. A replay the machine rejects is logged and dropped;
    /// the adopted snapshot already carries ground truth.
    fn replay(&mut self, counter: WireMove) {
        debug!(?counter, "Replaying opponent move");

        if let Some(from) = counter.from {
            if !matches!(self.session.handle_click(from), ClickOutcome::Selected(_)) {
                warn!(%from, "Replay selection rejected");
                return;
            }
        }
        let outcome = self.session.handle_click(counter.to);
        if !outcome.is_accepted() {
            warn!(to = %counter.to, ?outcome, "Replay destination rejected");
        }
    }

    /// The reconciled session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Whether a submission is outstanding.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}
