use rand::distributions::{Distribution, Uniform};
use rand::RngCore;

use super::ActionSelection;
use crate::env::Direction;

/// Uniformly random among the four directions, ignoring the value
/// estimates. This is the learning-phase baseline.
#[derive(Debug, Clone)]
pub struct UniformRandom {
    rand_action_selecter: Uniform<usize>,
}

impl UniformRandom {
    pub fn new() -> Self {
        Self {
            rand_action_selecter: Uniform::from(0..Direction::COUNT),
        }
    }
}

impl Default for UniformRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSelection for UniformRandom {
    fn get_action(
        &mut self,
        _values: &[f64; Direction::COUNT],
        rng: &mut dyn RngCore,
    ) -> Direction {
        Direction::from(self.rand_action_selecter.sample(rng))
    }
}
