//! Commonly used types and utilities for ease of import.

pub use crate::{
    Orientation, Position, Sea, SeaObserver, ShootingStrategy, ShootingStrategyName, ShotResult,
    TileState,
};

#[cfg(feature = "std")]
pub use crate::init_logging;
