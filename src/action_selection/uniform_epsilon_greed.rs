use rand::distributions::{Distribution, Uniform};
use rand::RngCore;

use super::ActionSelection;
use crate::env::Direction;
use crate::utils::shuffled_argmax;

/// ε-greedy selection: with probability ε a uniformly random direction,
/// otherwise the highest-valued one with ties broken uniformly at random.
/// Opt-in; the baseline learner stays purely random.
#[derive(Debug, Clone)]
pub struct UniformEpsilonGreed {
    exploration_decider: Uniform<f64>,
    rand_action_selecter: Uniform<usize>,
    pub epsilon: f64,
}

impl UniformEpsilonGreed {
    pub fn new(epsilon: f64) -> Self {
        Self {
            exploration_decider: Uniform::from(0.0..1.0),
            rand_action_selecter: Uniform::from(0..Direction::COUNT),
            epsilon,
        }
    }

    fn should_explore(&self, rng: &mut dyn RngCore) -> bool {
        self.epsilon != 0.0 && self.exploration_decider.sample(rng) < self.epsilon
    }
}

impl ActionSelection for UniformEpsilonGreed {
    fn get_action(
        &mut self,
        values: &[f64; Direction::COUNT],
        rng: &mut dyn RngCore,
    ) -> Direction {
        if self.should_explore(rng) {
            Direction::from(self.rand_action_selecter.sample(rng))
        } else {
            Direction::from(shuffled_argmax(values, rng))
        }
    }
}
