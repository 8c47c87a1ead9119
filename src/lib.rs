//! # qhadam
//!
//! Quasi-hyperbolic Adam (QHAdam) for objectives that decompose into a sum of
//! per-example terms, driven by a generic mini-batch SGD loop.
//!
//! ```no_run
//! use ndarray::array;
//! use qhadam::{LinearRegression, QHAdam, Separable};
//!
//! let x = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
//! let y = array![2.0, -1.0, 1.0];
//! let mut f = Separable::new(LinearRegression::new(x, y)?);
//! let mut theta = array![0.0, 0.0];
//! let mut optimizer = QHAdam::default();
//! let objective = optimizer.optimize(&mut f, &mut theta)?;
//! # Ok::<(), qhadam::OptimError>(())
//! ```

pub mod config;
pub mod error;
pub mod function;
pub mod optim;
pub mod utils;

pub use config::{load_config, QHAdamConfig};
pub use error::{OptimError, OptimResult};
pub use function::{DecomposableFunction, LinearRegression, Separable, SeparableFunction};
pub use optim::{
    MomentState, OptimizationReport, QHAdam, QHAdamUpdate, Termination, UpdatePolicy, SGD,
};
pub use utils::ShuffleSequencer;
