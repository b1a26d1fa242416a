//! Bagh Chal (tigers and goats) engine.
//!
//! Tracks board occupancy on the 5×5 intersection grid, enforces
//! placement/movement/capture legality for the two asymmetric sides,
//! detects terminal conditions, and reconciles locally-predicted moves
//! with a remote authority's replies, including autonomous-opponent
//! counter-moves returned in the same response.
//!
//! # Architecture
//!
//! - **Game**: board, legality engine, turn state machine, win rules
//! - **Render**: collaborator seam for piece and highlight updates
//! - **Authority**: remote game server seam (REST) plus an in-process
//!   stand-in for offline play and tests
//! - **Reconcile**: optimistic local execution folded back into
//!   authoritative state
//!
//! # Example
//!
//! ```no_run
//! use baghchal::{GameSession, LocalAuthority, Point, Reconciler, StartGameConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut game = Reconciler::new(
//!     GameSession::new(),
//!     Box::new(LocalAuthority::new()),
//! );
//! game.start(&StartGameConfig::default()).await?;
//!
//! // Goat places at the center; the authority's tiger reply is
//! // replayed into the same session.
//! game.handle_click(Point::new(2, 2)).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod authority;
mod game;
mod reconcile;
mod render;

// Crate-level exports - Authority seam
pub use authority::{
    GameStart, LocalAuthority, RemoteAuthority, RestAuthority, SessionId, SessionSnapshot,
    StartGameConfig, WireMove,
};

// Crate-level exports - Game core
pub use game::{
    Board, CAPTURE_TARGET, CellState, ClickOutcome, GOAT_SUPPLY, GRID_SIZE, GameSession, Move,
    MoveError, Point, Resolution, Side, TIGER_COUNT, TurnState, all_tigers_trapped,
    legal_destinations, resolve,
};

// Crate-level exports - Reconciliation
pub use reconcile::Reconciler;

// Crate-level exports - Renderer seam
pub use render::{NullRenderer, Renderer};
