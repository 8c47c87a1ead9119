//! # Optimizer Configuration
//!
//! Serializable QHAdam settings, loadable from JSON.
//!
//! # Example
//!
//! ```json
//! {
//!   "step_size": 0.01,
//!   "batch_size": 16,
//!   "max_iterations": 0,
//!   "seed": 42
//! }
//! ```
//!
//! Omitted fields take their defaults.

use crate::error::{OptimError, OptimResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QHAdamConfig {
    pub step_size: f64,
    pub batch_size: usize,
    /// Momentum weight in the numerator (nu1).
    pub v1: f64,
    /// Second-moment weight in the denominator (nu2).
    pub v2: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    /// Data points to process; 0 runs until convergence.
    pub max_iterations: usize,
    pub tolerance: f64,
    pub shuffle: bool,
    pub reset_policy: bool,
    /// Re-evaluate the full objective at the end of every run.
    pub exact_objective: bool,
    /// Fixed seed for the visitation order; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for QHAdamConfig {
    fn default() -> Self {
        QHAdamConfig {
            step_size: 0.001,
            batch_size: 32,
            v1: 0.7,
            v2: 1.0,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            max_iterations: 100_000,
            tolerance: 1e-5,
            shuffle: true,
            reset_policy: true,
            exact_objective: false,
            seed: None,
        }
    }
}

fn non_negative(name: &'static str, value: f64) -> OptimResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(OptimError::InvalidHyperparameter {
            name,
            value,
            reason: "must be finite and non-negative",
        });
    }
    Ok(())
}

fn positive(name: &'static str, value: f64) -> OptimResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(OptimError::InvalidHyperparameter {
            name,
            value,
            reason: "must be finite and positive",
        });
    }
    Ok(())
}

fn decay_rate(name: &'static str, value: f64) -> OptimResult<()> {
    if !(0.0..1.0).contains(&value) {
        return Err(OptimError::InvalidHyperparameter {
            name,
            value,
            reason: "must lie in [0, 1)",
        });
    }
    Ok(())
}

fn finite(name: &'static str, value: f64) -> OptimResult<()> {
    if !value.is_finite() {
        return Err(OptimError::InvalidHyperparameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    Ok(())
}

impl QHAdamConfig {
    /// Parses a JSON document and validates it.
    pub fn from_json_str(contents: &str) -> OptimResult<Self> {
        let config: QHAdamConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> OptimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks hyperparameter ranges.
    pub fn validate(&self) -> OptimResult<()> {
        if self.batch_size == 0 {
            return Err(OptimError::InvalidBatchSize(self.batch_size));
        }
        non_negative("step_size", self.step_size)?;
        non_negative("tolerance", self.tolerance)?;
        positive("epsilon", self.epsilon)?;
        decay_rate("beta1", self.beta1)?;
        decay_rate("beta2", self.beta2)?;
        finite("v1", self.v1)?;
        finite("v2", self.v2)?;
        Ok(())
    }
}

/// Loads and validates a configuration from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> OptimResult<QHAdamConfig> {
    let contents = fs::read_to_string(path)?;
    QHAdamConfig::from_json_str(&contents)
}
