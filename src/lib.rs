#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitboard;
mod common;
mod config;
#[cfg(feature = "std")]
mod logging;
mod position;
pub mod prelude;
mod sea;
mod ship;
pub mod strategy;

pub use bitboard::{BitBoard, BitBoardError, Positions};
pub use common::*;
pub use config::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use position::Position;
pub use sea::{Sea, SeaObserver};
pub use ship::*;
pub use strategy::{
    HuntState, RandomShooting, SeekThenDestroyShooting, ShootingStrategy, ShootingStrategyName,
};
