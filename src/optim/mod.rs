//! # Optimization Algorithms (`optim`)
//!
//! The generic mini-batch driver (`SGD`), the QHAdam update rule it is
//! parameterized with, and the `QHAdam` facade that wires the two together.

use crate::error::OptimResult;
use ndarray::{Array, Dimension};

// --- Submodules ---
pub mod qhadam;
pub mod qhadam_update;
pub mod sgd;

// Re-export optimizers
pub use qhadam::QHAdam;
pub use qhadam_update::{MomentState, QHAdamUpdate};
pub use sgd::{OptimizationReport, Termination, SGD};

// --- Update Policy Trait ---

/// A rule turning a gradient into a parameter step.
///
/// The driver owns one policy and calls `update` once per mini-batch. Any
/// state the rule keeps (moment estimates, step counters) lives inside the
/// policy and is sized by `initialize`.
pub trait UpdatePolicy<D: Dimension> {
    /// Allocates zeroed state for iterates of the given shape.
    fn initialize(&mut self, shape: D);

    /// Whether `initialize` (or a lazy first `update`) has run.
    fn is_initialized(&self) -> bool;

    /// Shape of the stored state, if any.
    fn shape(&self) -> Option<&[usize]>;

    /// Zeros the stored state without changing its shape.
    fn reset(&mut self);

    /// Applies one step to `iterate` in place.
    ///
    /// # Returns
    /// * `OptimResult<()>`: `ShapeMismatch` if `iterate`, `gradient` and the
    ///   stored state disagree; nothing is modified in that case.
    fn update(
        &mut self,
        iterate: &mut Array<f64, D>,
        step_size: f64,
        gradient: &Array<f64, D>,
    ) -> OptimResult<()>;
}
