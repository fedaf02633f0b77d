use thiserror::Error;

/// Construction-time contract violations. The simulation itself performs no
/// I/O and never produces runtime errors; anything that goes wrong after a
/// successful construction is a programming error, not a recoverable
/// condition.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("arrival probability for {approach} must be within [0, 1], got {value}")]
    InvalidArrivalProbability { approach: &'static str, value: f64 },

    #[error("eagerness distribution parameter {parameter} is invalid: {value}")]
    InvalidDistributionParameter { parameter: &'static str, value: f64 },

    #[error("agent hyperparameter {parameter} must lie in {expected}, got {value}")]
    InvalidHyperparameter {
        parameter: &'static str,
        expected: &'static str,
        value: f64,
    },

    #[error("fixed cycle switch interval must be at least 1")]
    ZeroSwitchInterval,
}
