use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::control_system::TrafficAgent;
use crate::errors::ConfigError;
use crate::flow_analyzer::RunSchedule;
use crate::simulation_engine::{Intersection, IntersectionConfig};

/// Per-episode series recorded during training, used for convergence charts.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningCurves {
    /// Mean total queue length (both approaches) per episode.
    pub avg_queue_per_episode: Vec<f64>,
    /// Total accumulated reward per episode.
    pub reward_per_episode: Vec<f64>,
}

/// Runs the observe -> decide -> step -> learn loop for a whole training
/// schedule. Each episode gets a fresh intersection seeded from `seed` plus
/// the episode index, so a run is fully reproducible; the agent's weight map
/// carries over across episodes and is never reset.
pub fn train_traffic_agent(
    agent: &mut TrafficAgent,
    intersection_config: IntersectionConfig,
    schedule: &RunSchedule,
    seed: u64,
) -> Result<LearningCurves, ConfigError> {
    let mut avg_queue_per_episode = Vec::with_capacity(schedule.episodes as usize);
    let mut reward_per_episode = Vec::with_capacity(schedule.episodes as usize);

    for episode in 0..schedule.episodes {
        let rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(episode as u64));
        let mut intersection = Intersection::new(intersection_config, rng)?;
        let mut state = intersection.state();

        let mut episode_reward = 0.0;
        let mut queue_total = 0usize;

        for _ in 0..schedule.steps_per_episode {
            let action = agent.select_action(&state);
            let outcome = intersection.step(action);
            agent.update(&state, action, &outcome.state, outcome.reward);

            episode_reward += outcome.reward;
            queue_total += outcome.state.ns_cars + outcome.state.we_cars;
            state = outcome.state;
        }

        let avg_queue = queue_total as f64 / schedule.steps_per_episode as f64;
        avg_queue_per_episode.push(avg_queue);
        reward_per_episode.push(episode_reward);

        log::debug!(
            "episode {}/{}: reward {:.1}, avg queue {:.2}",
            episode + 1,
            schedule.episodes,
            episode_reward,
            avg_queue,
        );
    }

    Ok(LearningCurves {
        avg_queue_per_episode,
        reward_per_episode,
    })
}
