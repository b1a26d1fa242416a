//! Renderer collaborator seam.
//!
//! The engine tells a renderer which piece occupies which cell and
//! which cells to highlight; everything else about presentation lives
//! on the other side of this trait. Lookups are coordinate-keyed; the
//! engine never addresses scene objects by name.

use crate::game::{CellState, Point};

/// Receives board and highlight updates after every accepted transition.
pub trait Renderer: Send {
    /// Shows `state` at `p` (or clears the cell for `Empty`).
    fn set_piece(&mut self, p: Point, state: CellState);

    /// Toggles the highlight ring at `p`.
    fn set_highlight(&mut self, p: Point, active: bool);

    /// Clears every highlight on the board.
    fn clear_highlights(&mut self);
}

/// Renderer that drops everything; for headless sessions and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn set_piece(&mut self, _p: Point, _state: CellState) {}

    fn set_highlight(&mut self, _p: Point, _active: bool) {}

    fn clear_highlights(&mut self) {}
}
