// Reference tuning shared by the binaries and the benchmarks.

// Arrival probabilities per tick.
pub const DEFAULT_NS_ARRIVAL_PROBABILITY: f64 = 0.5;
pub const DEFAULT_WE_ARRIVAL_PROBABILITY: f64 = 0.2;

// Per-vehicle eagerness bounds.
pub const EAGERNESS_MIN: u8 = 1;
pub const EAGERNESS_MAX: u8 = 10;

// Q-learning hyperparameters. Alpha is deliberately small relative to the
// /100 feature scaling; larger values risk weight divergence.
pub const DEFAULT_EPSILON: f64 = 0.1;
pub const DEFAULT_GAMMA: f64 = 0.9;
pub const DEFAULT_ALPHA: f64 = 0.01;

// Training schedule used by the binaries.
pub const DEFAULT_TRAINING_EPISODES: u32 = 1000;
pub const DEFAULT_EVALUATION_EPISODES: u32 = 100;
pub const DEFAULT_STEPS_PER_EPISODE: u32 = 500;

// Window for smoothing learning curves before plotting.
pub const LEARNING_CURVE_SMOOTHING_WINDOW: usize = 50;
