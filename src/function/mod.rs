//! # Objective Functions (`function`)
//!
//! The capability contract the driver optimizes against, plus adapters and
//! a reference objective.
//!
//! A decomposable objective is a sum `f(θ) = Σ_i f_i(θ)` over `num_functions`
//! terms. The driver only ever asks for contiguous batches of *positions*
//! `[begin, begin + batch_size)`; which terms those positions refer to is
//! decided by the visitation order last passed to `shuffle`.

use crate::error::OptimResult;
use ndarray::{Array, Dimension};

// --- Submodules ---
pub mod linear_regression;
pub mod separable;

pub use linear_regression::LinearRegression;
pub use separable::{Separable, SeparableFunction};

/// Objective expressible as a sum over separable per-example terms.
pub trait DecomposableFunction<D: Dimension> {
    /// Number of separable terms (dataset size).
    fn num_functions(&self) -> usize;

    /// Sum of the terms at positions `[begin, begin + batch_size)`.
    fn evaluate(&self, iterate: &Array<f64, D>, begin: usize, batch_size: usize)
        -> OptimResult<f64>;

    /// Writes the gradient of the same batch sum into `gradient`
    /// (overwriting it). `gradient` has the iterate's shape.
    fn gradient(
        &self,
        iterate: &Array<f64, D>,
        begin: usize,
        gradient: &mut Array<f64, D>,
        batch_size: usize,
    ) -> OptimResult<()>;

    /// Objective and gradient in one call. Override when the two share work.
    fn evaluate_with_gradient(
        &self,
        iterate: &Array<f64, D>,
        begin: usize,
        gradient: &mut Array<f64, D>,
        batch_size: usize,
    ) -> OptimResult<f64> {
        let objective = self.evaluate(iterate, begin, batch_size)?;
        self.gradient(iterate, begin, gradient, batch_size)?;
        Ok(objective)
    }

    /// Applies a new visitation order: position `p` now refers to term
    /// `order[p]`. `order` is a permutation of `0..num_functions()`.
    fn shuffle(&mut self, order: &[usize]) -> OptimResult<()>;
}
