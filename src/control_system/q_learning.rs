use std::collections::HashMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::control_system::features;
use crate::control_system::SignalPolicy;
use crate::errors::ConfigError;
use crate::simulation_engine::{Action, IntersectionState};

/// Online Q-learning controller with linear function approximation.
///
/// Q(s, a) is the dot product of the feature vector with a lazily growing
/// weight map; weights are adjusted by semi-gradient TD(0) once per tick.
/// The weight map is never reset during a training run.
///
/// The update rule does not guard against divergence: the caller is
/// responsible for an alpha small enough for the /100 feature scale
/// (<= 0.01 in the reference tuning).
pub struct TrafficAgent {
    epsilon: f64,
    gamma: f64,
    alpha: f64,
    weights: HashMap<&'static str, f64>,
    rng: ChaCha8Rng,
}

impl TrafficAgent {
    /// Builds an agent, rejecting out-of-range hyperparameters. Exploration
    /// randomness comes from the injected source; the crate never anneals
    /// epsilon itself.
    pub fn new(epsilon: f64, gamma: f64, alpha: f64, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        for (parameter, value) in [("epsilon", epsilon), ("gamma", gamma)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidHyperparameter {
                    parameter,
                    expected: "[0, 1]",
                    value,
                });
            }
        }
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(ConfigError::InvalidHyperparameter {
                parameter: "alpha",
                expected: "(0, inf)",
                value: alpha,
            });
        }
        Ok(Self {
            epsilon,
            gamma,
            alpha,
            weights: HashMap::new(),
            rng,
        })
    }

    /// Read-only view of the learned weights, keyed by feature name.
    pub fn weights(&self) -> &HashMap<&'static str, f64> {
        &self.weights
    }

    /// Dot product of the (state, action) features with the weight map.
    /// Features without a learned weight contribute zero.
    pub fn q_value(&self, state: &IntersectionState, action: Action) -> f64 {
        features::extract(state, action)
            .iter()
            .map(|(name, value)| self.weights.get(name).copied().unwrap_or(0.0) * value)
            .sum()
    }

    /// Value of the best action available in `state`.
    pub fn best_value(&self, state: &IntersectionState) -> f64 {
        Action::ALL
            .iter()
            .map(|&action| self.q_value(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action. Actions are evaluated in the fixed order of
    /// `Action::ALL` and only a strictly greater Q-value replaces the
    /// incumbent, so ties resolve to `Switch`.
    pub fn best_action(&self, state: &IntersectionState) -> Action {
        let mut best_action = Action::Switch;
        let mut best_value = f64::NEG_INFINITY;
        for action in Action::ALL {
            let q = self.q_value(state, action);
            if q > best_value {
                best_value = q;
                best_action = action;
            }
        }
        best_action
    }

    /// Epsilon-greedy policy: a uniformly random action with probability
    /// epsilon, the greedy one otherwise.
    pub fn select_action(&mut self, state: &IntersectionState) -> Action {
        if self.rng.random::<f64>() < self.epsilon {
            if self.rng.random::<f64>() < 0.5 {
                Action::Switch
            } else {
                Action::Stay
            }
        } else {
            self.best_action(state)
        }
    }

    /// Semi-gradient TD(0) step towards `reward + gamma * best_value(next)`.
    /// Applied once per simulated tick, synchronously; no batching, no
    /// replay buffer.
    pub fn update(
        &mut self,
        state: &IntersectionState,
        action: Action,
        next_state: &IntersectionState,
        reward: f64,
    ) {
        let difference =
            reward + self.gamma * self.best_value(next_state) - self.q_value(state, action);
        for (name, value) in features::extract(state, action) {
            *self.weights.entry(name).or_insert(0.0) += self.alpha * difference * value;
        }
    }
}

impl SignalPolicy for TrafficAgent {
    fn decide(&mut self, state: &IntersectionState) -> Action {
        self.select_action(state)
    }
}
