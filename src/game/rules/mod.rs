//! Game rules for Bagh Chal.
//!
//! Pure functions evaluating terminal conditions, separated from board
//! storage and from the turn machinery that invokes them.

pub mod win;

pub use win::{all_tigers_trapped, evaluate};
