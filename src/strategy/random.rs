use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use crate::common::StrategyError;
use crate::position::Position;
use crate::sea::Sea;

use super::{ShootingStrategy, ShootingStrategyName};

/// Shoots uniformly at random among the never-shot cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShooting;

impl RandomShooting {
    pub fn new() -> Self {
        Self
    }
}

impl ShootingStrategy for RandomShooting {
    fn name(&self) -> ShootingStrategyName {
        ShootingStrategyName::Random
    }

    fn play_shoot(&mut self, rng: &mut SmallRng, sea: &Sea) -> Result<Position, StrategyError> {
        sea.all_normal_positions()
            .choose(rng)
            .copied()
            .ok_or(StrategyError::NoTargetLeft)
    }
}
