//! Shooting strategies
//!
//! A strategy picks the next cell to shoot on an opponent's sea, reading only
//! what the sea shows publicly (cell states and sink announcements):
//! - RandomShooting: uniform pick among never-shot cells
//! - SeekThenDestroyShooting: random seeking, then directed destruction of a
//!   hit ship

use alloc::boxed::Box;
use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use rand::rngs::SmallRng;

use crate::common::{ParseStrategyNameError, StrategyError};
use crate::position::Position;
use crate::sea::Sea;

/// Interface implemented by every shooting strategy.
///
/// The strategy never mutates the sea: the caller applies the returned
/// position with [`Sea::receive_shot`] before asking again. Outcomes of
/// earlier shots are read back from the sea on the next call.
pub trait ShootingStrategy {
    /// Identifier of the strategy.
    fn name(&self) -> ShootingStrategyName;

    /// Choose the next position to shoot. The position is never-shot at the
    /// time of the call; a sea with no such cell left is an error.
    fn play_shoot(&mut self, rng: &mut SmallRng, sea: &Sea) -> Result<Position, StrategyError>;
}

/// Closed set of available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum, serde::Serialize))]
#[cfg_attr(feature = "std", serde(rename_all = "kebab-case"))]
pub enum ShootingStrategyName {
    Random,
    SeekThenDestroyRandom,
}

impl ShootingStrategyName {
    pub const ALL: [ShootingStrategyName; 2] = [
        ShootingStrategyName::Random,
        ShootingStrategyName::SeekThenDestroyRandom,
    ];

    /// Fresh strategy of this kind.
    pub fn build(self) -> Box<dyn ShootingStrategy> {
        match self {
            ShootingStrategyName::Random => Box::new(RandomShooting::new()),
            ShootingStrategyName::SeekThenDestroyRandom => Box::new(SeekThenDestroyShooting::new()),
        }
    }
}

impl ShootingStrategyName {
    /// Kebab-case identifier, as shown and parsed.
    pub fn as_str(self) -> &'static str {
        match self {
            ShootingStrategyName::Random => "random",
            ShootingStrategyName::SeekThenDestroyRandom => "seek-then-destroy-random",
        }
    }
}

impl fmt::Display for ShootingStrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShootingStrategyName {
    type Err = ParseStrategyNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ParseStrategyNameError(s.to_string()))
    }
}

pub mod random;
pub use random::RandomShooting;

pub mod seek_destroy;
pub use seek_destroy::{HuntState, SeekThenDestroyShooting};
