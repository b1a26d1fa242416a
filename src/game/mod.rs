mod board;
mod moves;
mod point;
mod rules;
mod session;
mod types;

pub use board::Board;
pub use moves::{Move, MoveError, Resolution, apply, legal_destinations, resolve};
pub use point::{DIAGONALS, ORTHOGONALS, Point};
pub use rules::{all_tigers_trapped, evaluate};
pub use session::{ClickOutcome, GameSession, TurnState};
pub use types::{CAPTURE_TARGET, CellState, GOAT_SUPPLY, GRID_SIZE, Side, TIGER_COUNT};
