//! Core domain types for Bagh Chal.

use serde::{Deserialize, Serialize};

/// Width and height of the board in intersections.
pub const GRID_SIZE: i8 = 5;

/// Number of tigers on the board for the entire game.
pub const TIGER_COUNT: usize = 4;

/// Goats available for placement at game start.
pub const GOAT_SUPPLY: u8 = 20;

/// Captured goats required for a tiger win.
pub const CAPTURE_TARGET: u8 = 5;

/// The side a player controls.
///
/// Goats move first. On the wire a side is encoded as the cell code
/// of its pieces (tiger = 1, goat = 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Side {
    /// The four tigers.
    Tiger,
    /// The goat herd.
    Goat,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Tiger => Side::Goat,
            Side::Goat => Side::Tiger,
        }
    }

    /// The cell state occupied by this side's pieces.
    pub fn cell(self) -> CellState {
        match self {
            Side::Tiger => CellState::Tiger,
            Side::Goat => CellState::Goat,
        }
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> u8 {
        match side {
            Side::Tiger => 1,
            Side::Goat => 2,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Side::Tiger),
            2 => Ok(Side::Goat),
            other => Err(format!("invalid side code: {}", other)),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Tiger => write!(f, "Tiger"),
            Side::Goat => write!(f, "Goat"),
        }
    }
}

/// Occupancy of a single board intersection.
///
/// Wire encoding matches the authority's board arrays:
/// 0 = empty, 1 = tiger, 2 = goat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CellState {
    /// No piece at this intersection.
    Empty,
    /// Occupied by a tiger.
    Tiger,
    /// Occupied by a goat.
    Goat,
}

impl CellState {
    /// Returns the side owning the piece here, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            CellState::Empty => None,
            CellState::Tiger => Some(Side::Tiger),
            CellState::Goat => Some(Side::Goat),
        }
    }
}

impl From<CellState> for u8 {
    fn from(cell: CellState) -> u8 {
        match cell {
            CellState::Empty => 0,
            CellState::Tiger => 1,
            CellState::Goat => 2,
        }
    }
}

impl TryFrom<u8> for CellState {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CellState::Empty),
            1 => Ok(CellState::Tiger),
            2 => Ok(CellState::Goat),
            other => Err(format!("invalid cell code: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_round_trip() {
        assert_eq!(Side::Tiger.opponent(), Side::Goat);
        assert_eq!(Side::Goat.opponent().opponent(), Side::Goat);
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(u8::from(CellState::Empty), 0);
        assert_eq!(CellState::try_from(2), Ok(CellState::Goat));
        assert!(CellState::try_from(3).is_err());
        assert_eq!(Side::try_from(1), Ok(Side::Tiger));
        assert!(Side::try_from(0).is_err());
    }
}
