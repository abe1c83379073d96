mod uniform_epsilon_greed;
mod uniform_random;

use enum_dispatch::enum_dispatch;
use rand::RngCore;

pub use uniform_epsilon_greed::UniformEpsilonGreed;
pub use uniform_random::UniformRandom;

use crate::env::Direction;

#[enum_dispatch]
pub trait ActionSelection {
    fn get_action(&mut self, values: &[f64; Direction::COUNT], rng: &mut dyn RngCore)
        -> Direction;
}

#[derive(Debug, Clone)]
#[enum_dispatch(ActionSelection)]
pub enum EnumActionSelection {
    UniformRandom(UniformRandom),
    UniformEpsilonGreed(UniformEpsilonGreed),
}
