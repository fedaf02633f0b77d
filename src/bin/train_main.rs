// train_main.rs
use std::error::Error;
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use adaptive_signals::control_system::TrafficAgent;
use adaptive_signals::flow_analyzer::{train_traffic_agent, RunSchedule};
use adaptive_signals::global_variables::{DEFAULT_ALPHA, DEFAULT_EPSILON, DEFAULT_GAMMA};
use adaptive_signals::monitoring::{export_weights, plot_learning_curves};
use adaptive_signals::simulation_engine::IntersectionConfig;

#[derive(Serialize)]
struct EpisodeRecord {
    episode: u32,
    avg_queue: f64,
    total_reward: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = IntersectionConfig::default();
    let schedule = RunSchedule::default();
    let seed = 42;

    log::info!(
        "training on the {} distribution: {} episodes x {} steps",
        config.eagerness_distribution.label(),
        schedule.episodes,
        schedule.steps_per_episode,
    );

    let mut agent = TrafficAgent::new(
        DEFAULT_EPSILON,
        DEFAULT_GAMMA,
        DEFAULT_ALPHA,
        ChaCha8Rng::seed_from_u64(7),
    )?;
    let curves = train_traffic_agent(&mut agent, config, &schedule, seed)?;

    let mut wtr = csv::Writer::from_path("learning_curve.csv")?;
    for (index, (&avg_queue, &total_reward)) in curves
        .avg_queue_per_episode
        .iter()
        .zip(&curves.reward_per_episode)
        .enumerate()
    {
        wtr.serialize(EpisodeRecord {
            episode: index as u32 + 1,
            avg_queue,
            total_reward,
        })?;
    }
    wtr.flush()?;
    println!("Learning curve written to learning_curve.csv");

    export_weights(Path::new("learned_weights.json"), agent.weights())?;
    println!("Learned weights written to learned_weights.json");

    let label = config.eagerness_distribution.label().to_string();
    plot_learning_curves(
        Path::new("learning_curve.png"),
        "Reward per episode",
        "total reward",
        &[(label, curves.reward_per_episode.clone())],
    )?;
    println!("Learning curve plot saved to learning_curve.png");

    Ok(())
}
