// agent_comparison_main.rs
//
// Trains one Q-learning agent per eagerness distribution, evaluates each of
// them together with a set of fixed-cycle baselines, prints the comparison
// table, and writes the CSV/PNG reports.
use std::error::Error;
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use adaptive_signals::control_system::{FixedCycleAgent, TrafficAgent};
use adaptive_signals::flow_analyzer::{
    evaluate_policy, train_traffic_agent, EvaluationSummary, RunSchedule,
};
use adaptive_signals::global_variables::{
    DEFAULT_ALPHA, DEFAULT_EPSILON, DEFAULT_EVALUATION_EPISODES, DEFAULT_GAMMA,
    DEFAULT_STEPS_PER_EPISODE,
};
use adaptive_signals::monitoring::{
    log_evaluation_results, plot_learning_curves, plot_reward_comparison,
};
use adaptive_signals::simulation_engine::{EagernessDistribution, IntersectionConfig};

const TRAINING_SEED: u64 = 42;
const EVALUATION_SEED: u64 = 1042;
const BASELINE_INTERVALS: [u32; 4] = [5, 10, 15, 20];

const SWITCH_FEATURES: [&str; 5] = [
    "switch_very_fast",
    "switch_fast",
    "switch_moderate",
    "switch_inversely_proportional",
    "patience_reward",
];

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let training_schedule = RunSchedule::default();
    let evaluation_schedule = RunSchedule {
        episodes: DEFAULT_EVALUATION_EPISODES,
        steps_per_episode: DEFAULT_STEPS_PER_EPISODE,
    };

    let mut results: Vec<EvaluationSummary> = Vec::new();
    let mut queue_curves = Vec::new();
    let mut reward_curves = Vec::new();

    for (index, distribution) in EagernessDistribution::reference_set().iter().enumerate() {
        let label = distribution.label();
        log::info!("training rl agent on the {label} distribution");

        let mut agent = TrafficAgent::new(
            DEFAULT_EPSILON,
            DEFAULT_GAMMA,
            DEFAULT_ALPHA,
            ChaCha8Rng::seed_from_u64(7 + index as u64),
        )?;
        let config = IntersectionConfig::with_distribution(*distribution);
        let curves = train_traffic_agent(&mut agent, config, &training_schedule, TRAINING_SEED)?;

        queue_curves.push((label.to_string(), curves.avg_queue_per_episode));
        reward_curves.push((label.to_string(), curves.reward_per_episode));

        println!("\nSwitch-related weights learned on {label}:");
        for feature in SWITCH_FEATURES {
            if let Some(weight) = agent.weights().get(feature) {
                println!("  {feature:.<38} {weight:>10.4}");
            }
        }

        let name = format!("rl ({label})");
        log::info!("evaluating {name}");
        let summary = evaluate_policy(
            &mut agent,
            config,
            &evaluation_schedule,
            EVALUATION_SEED,
            &name,
        )?;
        results.push(summary);
    }

    // Baselines are insensitive to the eagerness distribution; evaluate them
    // on the uniform one.
    let baseline_config = IntersectionConfig::with_distribution(EagernessDistribution::Uniform);
    for interval in BASELINE_INTERVALS {
        let name = format!("fixed cycle ({interval} steps)");
        log::info!("evaluating {name}");
        let mut baseline = FixedCycleAgent::new(interval)?;
        let summary = evaluate_policy(
            &mut baseline,
            baseline_config,
            &evaluation_schedule,
            EVALUATION_SEED,
            &name,
        )?;
        results.push(summary);
    }

    println!("\n=== Agent comparison ===\n");
    println!(
        "{:<28} {:>12} {:>11} {:>10} {:>10} {:>10} {:>10}",
        "agent", "avg reward", "std reward", "avg queue", "max queue", "avg wait", "switches",
    );
    for result in &results {
        println!(
            "{:<28} {:>12.2} {:>11.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            result.name,
            result.avg_reward,
            result.std_reward,
            result.avg_queue,
            result.max_queue,
            result.avg_wait_time,
            result.avg_switches,
        );
    }

    let best_baseline = results
        .iter()
        .filter(|r| r.name.starts_with("fixed"))
        .map(|r| r.avg_reward)
        .fold(f64::NEG_INFINITY, f64::max);
    println!("\nImprovement over the best fixed cycle:");
    for result in results.iter().filter(|r| r.name.starts_with("rl")) {
        let improvement = (result.avg_reward - best_baseline) / best_baseline.abs() * 100.0;
        println!("  {:<28} {improvement:>7.2}%", result.name);
    }

    log_evaluation_results(Path::new("agent_comparison.csv"), &results)?;
    plot_learning_curves(
        Path::new("queue_curves.png"),
        "Average queue length per training episode",
        "vehicles in queue",
        &queue_curves,
    )?;
    plot_learning_curves(
        Path::new("learning_curves.png"),
        "Reward per training episode",
        "total reward",
        &reward_curves,
    )?;
    plot_reward_comparison(Path::new("reward_comparison.png"), &results)?;
    println!(
        "\nReports written: agent_comparison.csv, queue_curves.png, learning_curves.png, reward_comparison.png"
    );

    Ok(())
}
