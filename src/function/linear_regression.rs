//! # Least-Squares Linear Regression
//!
//! `f(θ) = Σ_i (x_iᵀ θ − y_i)²`, one term per row of the design matrix.

use super::SeparableFunction;
use crate::error::{OptimError, OptimResult};
use ndarray::{Array1, Array2, Ix1};

/// Squared-error loss over the rows of a design matrix.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    predictors: Array2<f64>,
    responses: Array1<f64>,
}

impl LinearRegression {
    /// # Arguments
    /// * `predictors`: one example per row.
    /// * `responses`: one label per row of `predictors`.
    pub fn new(predictors: Array2<f64>, responses: Array1<f64>) -> OptimResult<Self> {
        if predictors.nrows() != responses.len() {
            return Err(OptimError::ShapeMismatch {
                expected: vec![predictors.nrows()],
                got: vec![responses.len()],
            });
        }
        Ok(LinearRegression { predictors, responses })
    }

    pub fn num_features(&self) -> usize {
        self.predictors.ncols()
    }

    /// Residual `x_iᵀ θ − y_i`.
    fn residual(&self, theta: &Array1<f64>, index: usize) -> OptimResult<f64> {
        if theta.len() != self.num_features() {
            return Err(OptimError::ShapeMismatch {
                expected: vec![self.num_features()],
                got: theta.shape().to_vec(),
            });
        }
        Ok(self.predictors.row(index).dot(theta) - self.responses[index])
    }
}

impl SeparableFunction for LinearRegression {
    type Dim = Ix1;

    fn num_functions(&self) -> usize {
        self.predictors.nrows()
    }

    fn evaluate_one(&self, theta: &Array1<f64>, index: usize) -> OptimResult<f64> {
        let r = self.residual(theta, index)?;
        Ok(r * r)
    }

    fn add_gradient(
        &self,
        theta: &Array1<f64>,
        index: usize,
        gradient: &mut Array1<f64>,
    ) -> OptimResult<()> {
        let r = self.residual(theta, index)?;
        gradient.scaled_add(2.0 * r, &self.predictors.row(index));
        Ok(())
    }
}
