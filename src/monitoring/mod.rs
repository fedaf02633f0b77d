// monitoring/mod.rs
pub mod reporting;

pub use reporting::{
    export_weights, log_evaluation_results, moving_average, plot_learning_curves,
    plot_reward_comparison,
};
