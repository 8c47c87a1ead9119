//! # QHAdam Optimizer
//!
//! Convenience wrapper: the mini-batch `SGD` driver parameterized with the
//! `QHAdamUpdate` rule, with every hyperparameter reachable from one place.

use super::qhadam_update::QHAdamUpdate;
use super::sgd::{OptimizationReport, SGD};
use crate::config::QHAdamConfig;
use crate::error::OptimResult;
use crate::function::DecomposableFunction;
use ndarray::{Array, Dimension};

/// QHAdam optimizer over iterates of dimensionality `D`.
#[derive(Debug, Clone)]
pub struct QHAdam<D: Dimension> {
    optimizer: SGD<QHAdamUpdate<D>>,
}

impl<D: Dimension> QHAdam<D> {
    /// Creates a new QHAdam optimizer instance.
    ///
    /// # Arguments
    /// * `step_size`: Learning rate (alpha).
    /// * `batch_size`: Data points per gradient estimate.
    /// * `v1`: Weight of the momentum term in the numerator (nu1).
    /// * `v2`: Weight of the second-moment term in the denominator (nu2).
    /// * `beta1`: Decay rate of the first moment estimate.
    /// * `beta2`: Decay rate of the second moment estimate.
    /// * `epsilon`: Denominator guard.
    /// * `max_iterations`: Data points to process before stopping (0 = no limit).
    /// * `tolerance`: Full-pass objective change that counts as converged.
    /// * `shuffle`: Visit functions in a fresh random order each pass.
    /// * `reset_policy`: Zero the moment state at the start of every `optimize`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        step_size: f64,
        batch_size: usize,
        v1: f64,
        v2: f64,
        beta1: f64,
        beta2: f64,
        epsilon: f64,
        max_iterations: usize,
        tolerance: f64,
        shuffle: bool,
        reset_policy: bool,
    ) -> Self {
        let policy = QHAdamUpdate::new(epsilon, beta1, beta2, v1, v2);
        let optimizer = SGD::new(step_size, batch_size, max_iterations, tolerance, shuffle, policy)
            .with_reset_policy(reset_policy);
        QHAdam { optimizer }
    }

    /// Builds an optimizer from a validated configuration.
    pub fn from_config(config: &QHAdamConfig) -> OptimResult<Self> {
        config.validate()?;
        let mut qhadam = Self::new(
            config.step_size,
            config.batch_size,
            config.v1,
            config.v2,
            config.beta1,
            config.beta2,
            config.epsilon,
            config.max_iterations,
            config.tolerance,
            config.shuffle,
            config.reset_policy,
        );
        qhadam.set_exact_objective(config.exact_objective);
        if let Some(seed) = config.seed {
            qhadam.set_seed(seed);
        }
        Ok(qhadam)
    }

    /// Runs the optimization; see [`SGD::optimize`].
    pub fn optimize<F>(&mut self, function: &mut F, iterate: &mut Array<f64, D>) -> OptimResult<f64>
    where
        F: DecomposableFunction<D>,
    {
        self.optimizer.optimize(function, iterate)
    }

    pub fn optimize_with_report<F>(
        &mut self,
        function: &mut F,
        iterate: &mut Array<f64, D>,
    ) -> OptimResult<OptimizationReport>
    where
        F: DecomposableFunction<D>,
    {
        self.optimizer.optimize_with_report(function, iterate)
    }

    // --- Driver parameters ---

    pub fn step_size(&self) -> f64 {
        self.optimizer.step_size()
    }

    pub fn set_step_size(&mut self, step_size: f64) {
        self.optimizer.set_step_size(step_size);
    }

    pub fn batch_size(&self) -> usize {
        self.optimizer.batch_size()
    }

    pub fn set_batch_size(&mut self, batch_size: usize) {
        self.optimizer.set_batch_size(batch_size);
    }

    pub fn max_iterations(&self) -> usize {
        self.optimizer.max_iterations()
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.optimizer.set_max_iterations(max_iterations);
    }

    pub fn tolerance(&self) -> f64 {
        self.optimizer.tolerance()
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.optimizer.set_tolerance(tolerance);
    }

    pub fn shuffle(&self) -> bool {
        self.optimizer.shuffle()
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.optimizer.set_shuffle(shuffle);
    }

    pub fn reset_policy(&self) -> bool {
        self.optimizer.reset_policy()
    }

    pub fn set_reset_policy(&mut self, reset_policy: bool) {
        self.optimizer.set_reset_policy(reset_policy);
    }

    pub fn exact_objective(&self) -> bool {
        self.optimizer.exact_objective()
    }

    pub fn set_exact_objective(&mut self, exact_objective: bool) {
        self.optimizer.set_exact_objective(exact_objective);
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.optimizer.set_seed(seed);
    }

    // --- Update rule parameters ---

    pub fn v1(&self) -> f64 {
        self.optimizer.update_policy().v1()
    }

    pub fn set_v1(&mut self, v1: f64) {
        self.optimizer.update_policy_mut().set_v1(v1);
    }

    pub fn v2(&self) -> f64 {
        self.optimizer.update_policy().v2()
    }

    pub fn set_v2(&mut self, v2: f64) {
        self.optimizer.update_policy_mut().set_v2(v2);
    }

    pub fn beta1(&self) -> f64 {
        self.optimizer.update_policy().beta1()
    }

    pub fn set_beta1(&mut self, beta1: f64) {
        self.optimizer.update_policy_mut().set_beta1(beta1);
    }

    pub fn beta2(&self) -> f64 {
        self.optimizer.update_policy().beta2()
    }

    pub fn set_beta2(&mut self, beta2: f64) {
        self.optimizer.update_policy_mut().set_beta2(beta2);
    }

    pub fn epsilon(&self) -> f64 {
        self.optimizer.update_policy().epsilon()
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.optimizer.update_policy_mut().set_epsilon(epsilon);
    }

    /// The QHAdam rule and its moment state.
    pub fn update_policy(&self) -> &QHAdamUpdate<D> {
        self.optimizer.update_policy()
    }

    pub fn update_policy_mut(&mut self) -> &mut QHAdamUpdate<D> {
        self.optimizer.update_policy_mut()
    }
}

impl<D: Dimension> Default for QHAdam<D> {
    fn default() -> Self {
        Self::new(0.001, 32, 0.7, 1.0, 0.9, 0.999, 1e-8, 100_000, 1e-5, true, true)
    }
}
