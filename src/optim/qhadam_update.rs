//! # QHAdam Update Rule
//!
//! Quasi-hyperbolic Adam: a weighted blend of the raw gradient and its
//! bias-corrected moment estimates.
//! Reference: Quasi-hyperbolic momentum and Adam for deep learning - https://arxiv.org/abs/1810.06801

use super::UpdatePolicy;
use crate::error::{OptimError, OptimResult};
use ndarray::{Array, Dimension, Zip};
use serde::{Deserialize, Serialize};

/// Moment estimates carried between steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "D: Serialize",
    deserialize = "D: Deserialize<'de>"
))]
pub struct MomentState<D: Dimension> {
    /// 1st moment estimate (momentum) - m_t
    pub first_moment: Array<f64, D>,
    /// 2nd moment estimate (uncentered variance) - v_t
    pub second_moment: Array<f64, D>,
    /// Number of updates applied since the last reset - t
    pub iteration: u64,
}

impl<D: Dimension> MomentState<D> {
    /// Zeroed state for the given shape.
    pub fn zeros(shape: D) -> Self {
        MomentState {
            first_moment: Array::zeros(shape.clone()),
            second_moment: Array::zeros(shape),
            iteration: 0,
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.first_moment.shape()
    }
}

/// QHAdam update policy.
///
/// With `v1 = v2 = 0` the step is `step_size * g / (|g| + eps)`; with
/// `v1 = v2 = 1` it is exactly Adam. Anything in between interpolates.
#[derive(Clone, Debug)]
pub struct QHAdamUpdate<D: Dimension> {
    epsilon: f64,
    beta1: f64,
    beta2: f64,
    v1: f64,
    v2: f64,
    state: Option<MomentState<D>>,
}

impl<D: Dimension> QHAdamUpdate<D> {
    /// Creates a policy; moments are allocated by `initialize`.
    pub fn new(epsilon: f64, beta1: f64, beta2: f64, v1: f64, v2: f64) -> Self {
        QHAdamUpdate { epsilon, beta1, beta2, v1, v2, state: None }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    pub fn beta1(&self) -> f64 {
        self.beta1
    }

    pub fn set_beta1(&mut self, beta1: f64) {
        self.beta1 = beta1;
    }

    pub fn beta2(&self) -> f64 {
        self.beta2
    }

    pub fn set_beta2(&mut self, beta2: f64) {
        self.beta2 = beta2;
    }

    pub fn v1(&self) -> f64 {
        self.v1
    }

    pub fn set_v1(&mut self, v1: f64) {
        self.v1 = v1;
    }

    pub fn v2(&self) -> f64 {
        self.v2
    }

    pub fn set_v2(&mut self, v2: f64) {
        self.v2 = v2;
    }

    /// Current moment state, `None` before the first `initialize`.
    pub fn state(&self) -> Option<&MomentState<D>> {
        self.state.as_ref()
    }

    /// Replaces the moment state, e.g. from a checkpoint.
    pub fn restore(&mut self, state: MomentState<D>) -> OptimResult<()> {
        if state.first_moment.shape() != state.second_moment.shape() {
            return Err(OptimError::ShapeMismatch {
                expected: state.first_moment.shape().to_vec(),
                got: state.second_moment.shape().to_vec(),
            });
        }
        self.state = Some(state);
        Ok(())
    }

    pub fn iteration(&self) -> u64 {
        self.state.as_ref().map_or(0, |s| s.iteration)
    }
}

impl<D: Dimension> Default for QHAdamUpdate<D> {
    fn default() -> Self {
        Self::new(1e-8, 0.9, 0.999, 0.7, 1.0)
    }
}

impl<D: Dimension> UpdatePolicy<D> for QHAdamUpdate<D> {
    fn initialize(&mut self, shape: D) {
        self.state = Some(MomentState::zeros(shape));
    }

    fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn shape(&self) -> Option<&[usize]> {
        self.state.as_ref().map(|s| s.shape())
    }

    fn reset(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.first_moment.fill(0.0);
            state.second_moment.fill(0.0);
            state.iteration = 0;
        }
    }

    fn update(
        &mut self,
        iterate: &mut Array<f64, D>,
        step_size: f64,
        gradient: &Array<f64, D>,
    ) -> OptimResult<()> {
        if iterate.shape() != gradient.shape() {
            return Err(OptimError::ShapeMismatch {
                expected: iterate.shape().to_vec(),
                got: gradient.shape().to_vec(),
            });
        }
        let state = self
            .state
            .get_or_insert_with(|| MomentState::zeros(iterate.raw_dim()));
        if state.first_moment.shape() != iterate.shape() {
            return Err(OptimError::ShapeMismatch {
                expected: state.first_moment.shape().to_vec(),
                got: iterate.shape().to_vec(),
            });
        }

        state.iteration += 1;
        let (beta1, beta2, v1, v2, eps) = (self.beta1, self.beta2, self.v1, self.v2, self.epsilon);

        // powf keeps beta^t well-defined for t beyond i32 range; it just underflows to 0
        let t = state.iteration as f64;
        let bias_correction1 = 1.0 - beta1.powf(t);
        let bias_correction2 = 1.0 - beta2.powf(t);

        Zip::from(iterate)
            .and(&mut state.first_moment)
            .and(&mut state.second_moment)
            .and(gradient)
            .for_each(|theta, m, v, &g| {
                let g_sq = g * g;
                *m = beta1 * *m + (1.0 - beta1) * g;
                *v = beta2 * *v + (1.0 - beta2) * g_sq;

                let m_hat = *m / bias_correction1;
                let v_hat = *v / bias_correction2;

                let numerator = (1.0 - v1) * g + v1 * m_hat;
                let denominator = ((1.0 - v2) * g_sq + v2 * v_hat).sqrt() + eps;
                *theta -= step_size * numerator / denominator;
            });

        Ok(())
    }
}
