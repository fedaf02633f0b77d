// flow_analyzer/mod.rs
pub mod evaluation;
pub mod training;

use crate::global_variables::{DEFAULT_STEPS_PER_EPISODE, DEFAULT_TRAINING_EPISODES};

/// How many episodes to run and how long each one is. Shared by training
/// and evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSchedule {
    pub episodes: u32,
    pub steps_per_episode: u32,
}

impl Default for RunSchedule {
    fn default() -> Self {
        Self {
            episodes: DEFAULT_TRAINING_EPISODES,
            steps_per_episode: DEFAULT_STEPS_PER_EPISODE,
        }
    }
}

pub use evaluation::{evaluate_policy, mean, std_deviation, EvaluationSummary};
pub use training::{train_traffic_agent, LearningCurves};
