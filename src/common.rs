//! Common types: cell states and the errors of the sea and the strategies.

use alloc::string::String;
use thiserror::Error;

use crate::bitboard::BitBoardError;
use crate::position::Position;

/// Observable state of a sea cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileState {
    /// Never shot.
    Normal,
    /// Shot, no ship there.
    Shot,
    /// Shot, a ship was hit.
    Touched,
}

/// Result of a legal shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotResult {
    /// No ship at the target.
    Miss,
    /// A ship was hit and is still afloat.
    Hit,
    /// The shot sank a ship, carrying its name.
    Sink(&'static str),
}

impl ShotResult {
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

/// Errors returned by checked `Sea` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeaError {
    /// Underlying bitboard error.
    #[error("bitboard error: {0}")]
    BitBoard(#[from] BitBoardError),
    /// Position lies outside the sea.
    #[error("position {0} is out of bounds")]
    OutOfBounds(Position),
    /// The cell was already shot.
    #[error("position {0} was already shot")]
    AlreadyShot(Position),
    /// No ship is currently being positioned.
    #[error("no ship is being placed")]
    NoShipOnPlacing,
    /// The ship being positioned overlaps a placed ship or leaves the sea.
    #[error("ship placement is invalid")]
    InvalidPlacement,
    /// Random placement could not find a free spot.
    #[error("unable to place ship {0}")]
    UnableToPlaceShip(&'static str),
}

/// Errors returned by shooting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StrategyError {
    /// Asked to shoot at a sea with no untried cell left.
    #[error("no untried tile left to shoot at")]
    NoTargetLeft,
}

/// Error parsing a [`ShootingStrategyName`](crate::ShootingStrategyName).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shooting strategy {0:?}")]
pub struct ParseStrategyNameError(pub String);
