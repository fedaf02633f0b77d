use crate::control_system::SignalPolicy;
use crate::errors::ConfigError;
use crate::simulation_engine::{Action, IntersectionState};

/// Baseline controller that switches the lights every N ticks regardless of
/// traffic. Exists only as the comparison point for the learned policy.
pub struct FixedCycleAgent {
    switch_interval: u32,
    steps_since_switch: u32,
}

impl FixedCycleAgent {
    pub fn new(switch_interval: u32) -> Result<Self, ConfigError> {
        if switch_interval == 0 {
            return Err(ConfigError::ZeroSwitchInterval);
        }
        Ok(Self {
            switch_interval,
            steps_since_switch: 0,
        })
    }

    pub fn switch_interval(&self) -> u32 {
        self.switch_interval
    }
}

impl SignalPolicy for FixedCycleAgent {
    fn decide(&mut self, _state: &IntersectionState) -> Action {
        self.steps_since_switch += 1;
        if self.steps_since_switch >= self.switch_interval {
            self.steps_since_switch = 0;
            Action::Switch
        } else {
            Action::Stay
        }
    }
}
