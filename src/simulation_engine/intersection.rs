use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::global_variables::{DEFAULT_NS_ARRIVAL_PROBABILITY, DEFAULT_WE_ARRIVAL_PROBABILITY};
use crate::simulation_engine::traffic_lights::TrafficLight;
use crate::simulation_engine::vehicles::{
    Approach, EagernessDistribution, EagernessSampler, Vehicle,
};

/// The only two ways a controller can influence the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Switch,
    Stay,
}

impl Action {
    /// Fixed evaluation order; ties between equal Q-values resolve to the
    /// first entry.
    pub const ALL: [Action; 2] = [Action::Switch, Action::Stay];
}

/// Construction-time tuning for one intersection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionConfig {
    /// Probability of one north-south arrival per tick.
    pub ns_arrival_probability: f64,
    /// Probability of one west-east arrival per tick.
    pub we_arrival_probability: f64,
    pub eagerness_distribution: EagernessDistribution,
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        Self {
            ns_arrival_probability: DEFAULT_NS_ARRIVAL_PROBABILITY,
            we_arrival_probability: DEFAULT_WE_ARRIVAL_PROBABILITY,
            eagerness_distribution: EagernessDistribution::default(),
        }
    }
}

impl IntersectionConfig {
    pub fn with_distribution(distribution: EagernessDistribution) -> Self {
        Self {
            eagerness_distribution: distribution,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (approach, value) in [
            ("north-south", self.ns_arrival_probability),
            ("west-east", self.we_arrival_probability),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidArrivalProbability { approach, value });
            }
        }
        Ok(())
    }
}

/// Observation handed to the controllers: light orientation, queue lengths,
/// queued eagerness per side, and the longest current green streak. Derived
/// fresh on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntersectionState {
    pub ns_green: bool,
    pub ns_cars: usize,
    pub we_cars: usize,
    pub ns_weight: u32,
    pub we_weight: u32,
    pub max_time_green: u32,
}

/// Result of advancing the simulation by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub state: IntersectionState,
    /// Negative summed eagerness of the side left waiting.
    pub reward: f64,
    /// Wait time of the vehicle that crossed this tick, 0 if none did.
    pub departed_wait: u32,
}

/// A two-approach intersection with one light and one FIFO queue per side.
///
/// At most one light is ever green. Both lights start red; the first
/// `Action::Switch` turns exactly one side green and from then on every
/// switch swaps the pair.
pub struct Intersection {
    config: IntersectionConfig,
    ns_light: TrafficLight,
    we_light: TrafficLight,
    ns_queue: VecDeque<Vehicle>,
    we_queue: VecDeque<Vehicle>,
    sampler: EagernessSampler,
    rng: ChaCha8Rng,
}

impl Intersection {
    /// Builds an intersection, rejecting out-of-range arrival probabilities
    /// and malformed distribution parameters. The caller supplies the random
    /// source so a fixed seed replays an exact tick sequence.
    pub fn new(config: IntersectionConfig, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let sampler = EagernessSampler::new(config.eagerness_distribution)?;
        Ok(Self {
            config,
            ns_light: TrafficLight::new(Approach::NorthSouth),
            we_light: TrafficLight::new(Approach::WestEast),
            ns_queue: VecDeque::new(),
            we_queue: VecDeque::new(),
            sampler,
            rng,
        })
    }

    pub fn config(&self) -> &IntersectionConfig {
        &self.config
    }

    pub fn ns_light(&self) -> &TrafficLight {
        &self.ns_light
    }

    pub fn we_light(&self) -> &TrafficLight {
        &self.we_light
    }

    pub fn ns_queue_len(&self) -> usize {
        self.ns_queue.len()
    }

    pub fn we_queue_len(&self) -> usize {
        self.we_queue.len()
    }

    /// Summed eagerness of the queued north-south vehicles.
    pub fn ns_weight(&self) -> u32 {
        Self::queued_weight(&self.ns_queue)
    }

    /// Summed eagerness of the queued west-east vehicles.
    pub fn we_weight(&self) -> u32 {
        Self::queued_weight(&self.we_queue)
    }

    fn queued_weight(queue: &VecDeque<Vehicle>) -> u32 {
        queue.iter().map(|vehicle| vehicle.eagerness as u32).sum()
    }

    /// Current observation. Idempotent between steps.
    pub fn state(&self) -> IntersectionState {
        IntersectionState {
            ns_green: self.ns_light.is_green,
            ns_cars: self.ns_queue.len(),
            we_cars: self.we_queue.len(),
            ns_weight: self.ns_weight(),
            we_weight: self.we_weight(),
            max_time_green: self.ns_light.time_green.max(self.we_light.time_green),
        }
    }

    /// Advances the simulation by one tick: apply the action, advance the
    /// green counters, admit arrivals, age every queued vehicle, let one
    /// vehicle cross on the green side, then score the tick.
    pub fn step(&mut self, action: Action) -> StepOutcome {
        if action == Action::Switch {
            self.ns_light.switch();
            // Keep the pair complementary. From the initial all-red state a
            // plain toggle of both sides would turn both green at once.
            if self.we_light.is_green == self.ns_light.is_green {
                self.we_light.switch();
            }
        }

        self.ns_light.update_time();
        self.we_light.update_time();

        self.admit_arrivals();

        for vehicle in self.ns_queue.iter_mut().chain(self.we_queue.iter_mut()) {
            vehicle.wait_time += 1;
        }

        let mut departed_wait = 0;
        if self.ns_light.is_green {
            if let Some(vehicle) = self.ns_queue.pop_front() {
                departed_wait = vehicle.wait_time;
            }
        }
        if self.we_light.is_green {
            if let Some(vehicle) = self.we_queue.pop_front() {
                departed_wait = vehicle.wait_time;
            }
        }

        // Penalty for the side left waiting, scored after the departure.
        // Before the first switch neither side is green; the north-south
        // queue is treated as the waiting side then.
        let wait_penalty = if self.ns_light.is_green {
            self.we_weight()
        } else {
            self.ns_weight()
        };

        StepOutcome {
            state: self.state(),
            reward: -(wait_penalty as f64),
            departed_wait,
        }
    }

    fn admit_arrivals(&mut self) {
        if self.rng.random::<f64>() < self.config.ns_arrival_probability {
            let eagerness = self.sampler.sample(&mut self.rng);
            self.ns_queue
                .push_back(Vehicle::new(Approach::NorthSouth, eagerness));
        }
        if self.rng.random::<f64>() < self.config.we_arrival_probability {
            let eagerness = self.sampler.sample(&mut self.rng);
            self.we_queue
                .push_back(Vehicle::new(Approach::WestEast, eagerness));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn intersection(config: IntersectionConfig, seed: u64) -> Intersection {
        Intersection::new(config, ChaCha8Rng::seed_from_u64(seed)).unwrap()
    }

    fn quiet_config() -> IntersectionConfig {
        IntersectionConfig {
            ns_arrival_probability: 0.0,
            we_arrival_probability: 0.0,
            eagerness_distribution: EagernessDistribution::Uniform,
        }
    }

    #[test]
    fn rejects_out_of_range_probabilities() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let config = IntersectionConfig {
                ns_arrival_probability: bad,
                ..IntersectionConfig::default()
            };
            assert!(Intersection::new(config, ChaCha8Rng::seed_from_u64(0)).is_err());
        }
    }

    #[test]
    fn first_switch_turns_exactly_one_side_green() {
        let mut intersection = intersection(quiet_config(), 1);
        assert!(!intersection.ns_light().is_green);
        assert!(!intersection.we_light().is_green);

        intersection.step(Action::Switch);
        assert!(intersection.ns_light().is_green);
        assert!(!intersection.we_light().is_green);
        assert_eq!(intersection.we_light().time_green, 0);
    }

    #[test]
    fn switch_always_leaves_the_pair_complementary() {
        let mut intersection = intersection(IntersectionConfig::default(), 2);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let action = if rng.random::<f64>() < 0.3 {
                Action::Switch
            } else {
                Action::Stay
            };
            intersection.step(action);
            assert!(
                !(intersection.ns_light().is_green && intersection.we_light().is_green),
                "both lights green",
            );
        }
    }

    #[test]
    fn state_read_is_idempotent() {
        let mut intersection = intersection(IntersectionConfig::default(), 3);
        for _ in 0..10 {
            intersection.step(Action::Stay);
        }
        assert_eq!(intersection.state(), intersection.state());
    }

    #[test]
    fn queue_lengths_follow_arrivals_and_departures() {
        let mut intersection = intersection(IntersectionConfig::default(), 4);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut previous = intersection.state();
        for _ in 0..500 {
            let action = if rng.random::<f64>() < 0.2 {
                Action::Switch
            } else {
                Action::Stay
            };
            let outcome = intersection.step(action);
            let departed = outcome.departed_wait > 0;
            let (active_before, active_after) = if outcome.state.ns_green {
                (previous.ns_cars as i64, outcome.state.ns_cars as i64)
            } else {
                (previous.we_cars as i64, outcome.state.we_cars as i64)
            };
            let delta = active_after - active_before;
            // One optional arrival minus one optional departure per side.
            let arrivals = delta + i64::from(departed);
            assert!(
                (0..=1).contains(&arrivals),
                "impossible queue delta {delta} (departed: {departed})",
            );
            previous = outcome.state;
        }
    }

    #[test]
    fn green_side_departure_reports_wait_time() {
        let mut intersection = intersection(
            IntersectionConfig {
                ns_arrival_probability: 1.0,
                we_arrival_probability: 0.0,
                eagerness_distribution: EagernessDistribution::Uniform,
            },
            5,
        );
        // Two ticks of arrivals while everything is red.
        intersection.step(Action::Stay);
        intersection.step(Action::Stay);
        assert_eq!(intersection.ns_queue_len(), 2);

        // Switch: north-south turns green, the head vehicle crosses with the
        // wait it accumulated (2 red ticks + this one).
        let outcome = intersection.step(Action::Switch);
        assert_eq!(outcome.departed_wait, 3);
        assert_eq!(intersection.ns_queue_len(), 2); // one left, one arrived
    }

    #[test]
    fn reward_penalizes_the_waiting_side() {
        let mut intersection = intersection(
            IntersectionConfig {
                ns_arrival_probability: 0.0,
                we_arrival_probability: 1.0,
                eagerness_distribution: EagernessDistribution::Uniform,
            },
            6,
        );
        let outcome = intersection.step(Action::Switch); // ns green
        assert!(outcome.state.ns_green);
        assert_eq!(outcome.reward, -(intersection.we_weight() as f64));
        assert!(outcome.reward < 0.0);
    }

    #[test]
    fn before_the_first_switch_the_ns_queue_is_penalized() {
        let mut intersection = intersection(
            IntersectionConfig {
                ns_arrival_probability: 1.0,
                we_arrival_probability: 0.0,
                eagerness_distribution: EagernessDistribution::Uniform,
            },
            7,
        );
        let outcome = intersection.step(Action::Stay);
        assert!(!outcome.state.ns_green);
        assert_eq!(outcome.reward, -(intersection.ns_weight() as f64));
    }

    #[test]
    fn empty_green_queue_departs_nothing() {
        let mut intersection = intersection(quiet_config(), 8);
        let outcome = intersection.step(Action::Switch);
        assert_eq!(outcome.departed_wait, 0);
    }
}
