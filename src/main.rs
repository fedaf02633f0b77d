use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use adaptive_signals::control_system::TrafficAgent;
use adaptive_signals::flow_analyzer::{train_traffic_agent, RunSchedule};
use adaptive_signals::global_variables::{DEFAULT_ALPHA, DEFAULT_EPSILON, DEFAULT_GAMMA};
use adaptive_signals::simulation_engine::IntersectionConfig;

fn main() {
    env_logger::init();

    let config = IntersectionConfig::default();
    let schedule = RunSchedule {
        episodes: 200,
        steps_per_episode: 200,
    };

    let mut agent = TrafficAgent::new(
        DEFAULT_EPSILON,
        DEFAULT_GAMMA,
        DEFAULT_ALPHA,
        ChaCha8Rng::seed_from_u64(7),
    )
    .expect("reference hyperparameters are valid");

    log::info!(
        "training on the {} distribution for {} episodes",
        config.eagerness_distribution.label(),
        schedule.episodes,
    );

    let curves = train_traffic_agent(&mut agent, config, &schedule, 42)
        .expect("reference configuration is valid");

    let last = curves.reward_per_episode.len().saturating_sub(20);
    let recent: Vec<f64> = curves.reward_per_episode[last..].to_vec();
    println!(
        "Trained {} episodes; mean reward over the last {}: {:.1}",
        schedule.episodes,
        recent.len(),
        adaptive_signals::flow_analyzer::mean(&recent),
    );

    println!("Learned weights:");
    let mut weights: Vec<(&str, f64)> = agent
        .weights()
        .iter()
        .map(|(&name, &weight)| (name, weight))
        .collect();
    weights.sort_by_key(|&(name, _)| name);
    for (name, weight) in weights {
        println!("  {name:.<35} {weight:>10.4}");
    }
}
