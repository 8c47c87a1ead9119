//! # Error Handling
//!
//! A single error enum shared by the update policies, the driver, the
//! reference objectives and the config/checkpoint helpers.

use std::error::Error as StdError;

/// Errors raised while configuring or running an optimization.
#[derive(thiserror::Error, Debug)]
pub enum OptimError {
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("Objective has no separable functions to optimize")]
    EmptyObjective,
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),
    #[error("Invalid hyperparameter {name} = {value}: {reason}")]
    InvalidHyperparameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("Batch [{begin}, {begin} + {batch_size}) is out of range for {num_functions} functions")]
    IndexOutOfRange {
        begin: usize,
        batch_size: usize,
        num_functions: usize,
    },
    #[error("Visitation order has length {got}, expected a permutation of {expected} indices")]
    InvalidOrder { expected: usize, got: usize },
    #[error("Objective error: {0}")]
    Objective(#[source] Box<dyn StdError + Send + Sync>),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization Error (Bincode): {0}")]
    Bincode(#[from] bincode::Error),
    #[error("Config Error (JSON): {0}")]
    Config(#[from] serde_json::Error),
}

impl OptimError {
    /// Wraps an error raised by a user objective so it can travel through
    /// the driver untouched. The original is available via `source()`.
    pub fn objective<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        OptimError::Objective(err.into())
    }
}

pub type OptimResult<T> = Result<T, OptimError>;
