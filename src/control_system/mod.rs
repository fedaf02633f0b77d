// control_system/mod.rs
pub mod features;
pub mod fixed_cycle;
pub mod q_learning;

use crate::simulation_engine::{Action, IntersectionState};

/// Common seam for everything that can drive the lights, so the evaluation
/// loop treats the learned agent and the fixed-cycle baseline uniformly.
pub trait SignalPolicy {
    fn decide(&mut self, state: &IntersectionState) -> Action;
}

pub use features::{extract, FeatureVector};
pub use fixed_cycle::FixedCycleAgent;
pub use q_learning::TrafficAgent;
