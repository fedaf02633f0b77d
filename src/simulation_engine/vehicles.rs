use rand::Rng;
use rand_distr::{Beta, Distribution, Exp, Normal, Poisson};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::global_variables::{EAGERNESS_MAX, EAGERNESS_MIN};

/// One of the two directions of traffic at the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Approach {
    NorthSouth,
    WestEast,
}

/// A queued vehicle waiting to cross the intersection.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub approach: Approach,
    /// Urgency in [1, 10]; weights both the queue cost and the reward penalty.
    pub eagerness: u8,
    /// Ticks spent queued so far.
    pub wait_time: u32,
}

impl Vehicle {
    pub fn new(approach: Approach, eagerness: u8) -> Self {
        Self {
            approach,
            eagerness,
            wait_time: 0,
        }
    }
}

/// How per-vehicle eagerness is drawn on arrival. Chosen at construction
/// time; the clipping into [1, 10] is part of the distribution definition,
/// not a post-processing step callers may change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EagernessDistribution {
    /// Integer uniform over [1, 10].
    Uniform,
    /// min(Poisson(lambda) + 1, 10); mostly 1-3, rarely above 5.
    Poisson { lambda: f64 },
    /// min(trunc(Exp(rate)) + 1, 10); mostly low with a long tail.
    Exponential { rate: f64 },
    /// max(1, trunc(Beta(alpha, beta) * 10)); skewed towards low values.
    Beta { alpha: f64, beta: f64 },
    /// clamp(trunc(Normal(mean, std_dev)), 1, 10).
    NormalLow { mean: f64, std_dev: f64 },
}

impl EagernessDistribution {
    pub fn poisson() -> Self {
        Self::Poisson { lambda: 2.0 }
    }

    pub fn exponential() -> Self {
        // Rate 0.5 gives a mean of 2 before truncation.
        Self::Exponential { rate: 0.5 }
    }

    pub fn beta() -> Self {
        Self::Beta {
            alpha: 2.0,
            beta: 5.0,
        }
    }

    pub fn normal_low() -> Self {
        Self::NormalLow {
            mean: 3.0,
            std_dev: 1.5,
        }
    }

    /// Short label used in report tables and chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Poisson { .. } => "poisson",
            Self::Exponential { .. } => "exponential",
            Self::Beta { .. } => "beta",
            Self::NormalLow { .. } => "normal_low",
        }
    }

    /// The five reference configurations compared by the statistics driver.
    pub fn reference_set() -> [EagernessDistribution; 5] {
        [
            Self::Uniform,
            Self::poisson(),
            Self::exponential(),
            Self::beta(),
            Self::normal_low(),
        ]
    }
}

impl Default for EagernessDistribution {
    fn default() -> Self {
        Self::poisson()
    }
}

enum PreparedDistribution {
    Uniform,
    Poisson(Poisson<f64>),
    Exponential(Exp<f64>),
    Beta(Beta<f64>),
    NormalLow(Normal<f64>),
}

/// Validated sampler for a configured eagerness distribution. Parameters are
/// checked once here so sampling itself cannot fail.
pub struct EagernessSampler {
    config: EagernessDistribution,
    prepared: PreparedDistribution,
}

impl EagernessSampler {
    pub fn new(config: EagernessDistribution) -> Result<Self, ConfigError> {
        let prepared = match config {
            EagernessDistribution::Uniform => PreparedDistribution::Uniform,
            EagernessDistribution::Poisson { lambda } => PreparedDistribution::Poisson(
                Poisson::new(lambda).map_err(|_| ConfigError::InvalidDistributionParameter {
                    parameter: "poisson lambda",
                    value: lambda,
                })?,
            ),
            EagernessDistribution::Exponential { rate } => PreparedDistribution::Exponential(
                Exp::new(rate).map_err(|_| ConfigError::InvalidDistributionParameter {
                    parameter: "exponential rate",
                    value: rate,
                })?,
            ),
            EagernessDistribution::Beta { alpha, beta } => PreparedDistribution::Beta(
                Beta::new(alpha, beta).map_err(|_| ConfigError::InvalidDistributionParameter {
                    parameter: "beta alpha/beta",
                    value: alpha,
                })?,
            ),
            EagernessDistribution::NormalLow { mean, std_dev } => PreparedDistribution::NormalLow(
                Normal::new(mean, std_dev).map_err(|_| {
                    ConfigError::InvalidDistributionParameter {
                        parameter: "normal std_dev",
                        value: std_dev,
                    }
                })?,
            ),
        };
        Ok(Self { config, prepared })
    }

    pub fn config(&self) -> EagernessDistribution {
        self.config
    }

    /// Draws one eagerness value, applying the clipping policy of the
    /// configured distribution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        match &self.prepared {
            PreparedDistribution::Uniform => rng.random_range(EAGERNESS_MIN..=EAGERNESS_MAX),
            PreparedDistribution::Poisson(poisson) => {
                let count = poisson.sample(rng) as u32;
                (count + 1).min(EAGERNESS_MAX as u32) as u8
            }
            PreparedDistribution::Exponential(exp) => {
                let value = exp.sample(rng) as u32;
                (value + 1).min(EAGERNESS_MAX as u32) as u8
            }
            PreparedDistribution::Beta(beta) => {
                let scaled = (beta.sample(rng) * 10.0) as u32;
                scaled.max(EAGERNESS_MIN as u32) as u8
            }
            PreparedDistribution::NormalLow(normal) => {
                let value = normal.sample(rng) as i32;
                value.clamp(EAGERNESS_MIN as i32, EAGERNESS_MAX as i32) as u8
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn samples(config: EagernessDistribution, count: usize) -> Vec<u8> {
        let sampler = EagernessSampler::new(config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        (0..count).map(|_| sampler.sample(&mut rng)).collect()
    }

    #[test]
    fn all_distributions_stay_in_bounds() {
        for config in EagernessDistribution::reference_set() {
            for value in samples(config, 2000) {
                assert!(
                    (EAGERNESS_MIN..=EAGERNESS_MAX).contains(&value),
                    "{} produced out-of-range eagerness {}",
                    config.label(),
                    value,
                );
            }
        }
    }

    #[test]
    fn uniform_reaches_both_bounds() {
        let values = samples(EagernessDistribution::Uniform, 2000);
        assert!(values.contains(&EAGERNESS_MIN));
        assert!(values.contains(&EAGERNESS_MAX));
    }

    #[test]
    fn poisson_skews_low() {
        let values = samples(EagernessDistribution::poisson(), 2000);
        let low = values.iter().filter(|&&v| v <= 4).count();
        assert!(low as f64 > values.len() as f64 * 0.75);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(EagernessSampler::new(EagernessDistribution::Poisson { lambda: -1.0 }).is_err());
        assert!(EagernessSampler::new(EagernessDistribution::Exponential { rate: 0.0 }).is_err());
        assert!(EagernessSampler::new(EagernessDistribution::Beta {
            alpha: 0.0,
            beta: 5.0,
        })
        .is_err());
        assert!(EagernessSampler::new(EagernessDistribution::NormalLow {
            mean: 3.0,
            std_dev: -1.5,
        })
        .is_err());
    }

    #[test]
    fn sampling_is_deterministic_under_a_fixed_seed() {
        let first = samples(EagernessDistribution::poisson(), 100);
        let second = samples(EagernessDistribution::poisson(), 100);
        assert_eq!(first, second);
    }
}
