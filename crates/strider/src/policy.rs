//! Action sources for headless rollouts

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use strider_agents::{ActionBuffers, ActionSpec};

/// Chooses actions from observations
pub trait Policy {
    fn act(&mut self, observations: &[f32], spec: &ActionSpec) -> ActionBuffers;
}

/// Uniformly random actions: continuous in `[-1, 1]`, discrete per branch
pub struct RandomPolicy {
    rng: Xoshiro256StarStar,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _observations: &[f32], spec: &ActionSpec) -> ActionBuffers {
        ActionBuffers {
            continuous: (0..spec.continuous)
                .map(|_| self.rng.gen_range(-1.0..=1.0))
                .collect(),
            discrete: spec
                .discrete_branches
                .iter()
                .map(|&size| {
                    if size == 0 {
                        0
                    } else {
                        self.rng.gen_range(0..size)
                    }
                })
                .collect(),
        }
    }
}

/// Neutral actions: every continuous value 0, every branch option 0
#[derive(Debug, Default)]
pub struct IdlePolicy;

impl Policy for IdlePolicy {
    fn act(&mut self, _observations: &[f32], spec: &ActionSpec) -> ActionBuffers {
        ActionBuffers {
            continuous: vec![0.0; spec.continuous],
            discrete: vec![0; spec.discrete_branches.len()],
        }
    }
}
