//! # Mini-Batch Stochastic Gradient Descent Driver

use super::UpdatePolicy;
use crate::error::{OptimError, OptimResult};
use crate::function::DecomposableFunction;
use crate::utils::shuffle::ShuffleSequencer;
use log::{debug, info, trace, warn};
use ndarray::{Array, Dimension};

/// Why a run stopped. Every variant is a normal return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Two consecutive full-pass objectives differed by less than `tolerance`.
    Converged,
    /// `max_iterations` data points were processed.
    IterationLimitReached,
    /// A full-pass objective was NaN or infinite.
    Diverged,
}

/// Summary of one `optimize` call.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationReport {
    /// Objective value returned by `optimize`.
    pub objective: f64,
    pub termination: Termination,
    /// Individual data points visited (the unit of `max_iterations`).
    pub points_processed: usize,
    /// Completed full passes over the dataset.
    pub passes: usize,
    /// Calls made to the update policy.
    pub steps: usize,
}

/// Generic mini-batch SGD loop.
///
/// Walks the objective's separable functions in batches of `batch_size`,
/// hands each batch gradient to the update policy `P` and checks for
/// convergence once per full pass. `max_iterations` counts data points, not
/// passes or batches; `0` removes the limit.
#[derive(Debug, Clone)]
pub struct SGD<P> {
    step_size: f64,
    batch_size: usize,
    max_iterations: usize,
    tolerance: f64,
    shuffle: bool,
    reset_policy: bool,
    exact_objective: bool,
    update_policy: P,
    sequencer: ShuffleSequencer,
}

impl<P> SGD<P> {
    /// Creates a new driver instance.
    ///
    /// # Arguments
    /// * `step_size`: Step size handed to the policy on every update.
    /// * `batch_size`: Data points per gradient estimate (must be >= 1 at `optimize`).
    /// * `max_iterations`: Data points to process before stopping (0 = no limit).
    /// * `tolerance`: Absolute change in the full-pass objective that counts as converged.
    /// * `shuffle`: Visit functions in a fresh random order each pass.
    /// * `update_policy`: The rule turning gradients into steps.
    ///
    /// The policy state is reset before every `optimize` call and the last
    /// pass objective is returned on convergence; see `with_reset_policy` and
    /// `with_exact_objective`.
    pub fn new(
        step_size: f64,
        batch_size: usize,
        max_iterations: usize,
        tolerance: f64,
        shuffle: bool,
        update_policy: P,
    ) -> Self {
        SGD {
            step_size,
            batch_size,
            max_iterations,
            tolerance,
            shuffle,
            reset_policy: true,
            exact_objective: false,
            update_policy,
            sequencer: ShuffleSequencer::new(),
        }
    }

    pub fn with_reset_policy(mut self, reset_policy: bool) -> Self {
        self.reset_policy = reset_policy;
        self
    }

    pub fn with_exact_objective(mut self, exact_objective: bool) -> Self {
        self.exact_objective = exact_objective;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.sequencer.reseed(seed);
        self
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn set_step_size(&mut self, step_size: f64) {
        self.step_size = step_size;
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn set_batch_size(&mut self, batch_size: usize) {
        self.batch_size = batch_size;
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
    }

    pub fn reset_policy(&self) -> bool {
        self.reset_policy
    }

    pub fn set_reset_policy(&mut self, reset_policy: bool) {
        self.reset_policy = reset_policy;
    }

    pub fn exact_objective(&self) -> bool {
        self.exact_objective
    }

    pub fn set_exact_objective(&mut self, exact_objective: bool) {
        self.exact_objective = exact_objective;
    }

    /// Reseeds the visitation-order generator.
    pub fn set_seed(&mut self, seed: u64) {
        self.sequencer.reseed(seed);
    }

    pub fn update_policy(&self) -> &P {
        &self.update_policy
    }

    pub fn update_policy_mut(&mut self) -> &mut P {
        &mut self.update_policy
    }

    /// Optimizes `function` starting from `iterate`, which is updated in
    /// place and holds the final point on return.
    ///
    /// # Returns
    /// * `OptimResult<f64>`: the final objective value. On error the iterate
    ///   keeps every update applied before the failure.
    pub fn optimize<D, F>(
        &mut self,
        function: &mut F,
        iterate: &mut Array<f64, D>,
    ) -> OptimResult<f64>
    where
        D: Dimension,
        P: UpdatePolicy<D>,
        F: DecomposableFunction<D>,
    {
        self.optimize_with_report(function, iterate)
            .map(|report| report.objective)
    }

    /// Same as `optimize`, also reporting why and when the run stopped.
    pub fn optimize_with_report<D, F>(
        &mut self,
        function: &mut F,
        iterate: &mut Array<f64, D>,
    ) -> OptimResult<OptimizationReport>
    where
        D: Dimension,
        P: UpdatePolicy<D>,
        F: DecomposableFunction<D>,
    {
        if self.batch_size == 0 {
            return Err(OptimError::InvalidBatchSize(self.batch_size));
        }
        let num_functions = function.num_functions();
        if num_functions == 0 {
            return Err(OptimError::EmptyObjective);
        }

        if self.reset_policy || !self.update_policy.is_initialized() {
            self.update_policy.initialize(iterate.raw_dim());
        } else if let Some(shape) = self.update_policy.shape() {
            if shape != iterate.shape() {
                return Err(OptimError::ShapeMismatch {
                    expected: shape.to_vec(),
                    got: iterate.shape().to_vec(),
                });
            }
        }

        let actual_max_iterations = if self.max_iterations == 0 {
            usize::MAX
        } else {
            self.max_iterations
        };

        // Identity when not shuffling, replacing any order left by an earlier run
        let order = self.sequencer.order(num_functions, self.shuffle);
        function.shuffle(&order)?;

        let mut gradient = Array::zeros(iterate.raw_dim());
        let mut overall_objective: f64 = 0.0;
        let mut last_objective = f64::MAX;
        let mut current_function = 0;
        let mut passes = 0;
        let mut steps = 0;
        let mut termination = Termination::IterationLimitReached;

        let mut i = 0;
        while i < actual_max_iterations {
            // Pass boundary: the cursor only reaches num_functions after a full pass
            if current_function == num_functions {
                passes += 1;
                debug!(
                    "SGD: pass {}, {} points processed, objective {}",
                    passes, i, overall_objective
                );

                if !overall_objective.is_finite() {
                    warn!(
                        "SGD: objective diverged to {}; terminating. Try a smaller step size?",
                        overall_objective
                    );
                    termination = Termination::Diverged;
                    break;
                }

                if (last_objective - overall_objective).abs() < self.tolerance {
                    info!(
                        "SGD: minimized within tolerance {} after {} passes",
                        self.tolerance, passes
                    );
                    termination = Termination::Converged;
                    break;
                }

                last_objective = overall_objective;
                overall_objective = 0.0;
                current_function = 0;

                if self.shuffle {
                    let order = self.sequencer.order(num_functions, true);
                    function.shuffle(&order)?;
                }
            }

            // Never past the batch size, the iteration limit, or the end of the pass
            let effective_batch_size = self
                .batch_size
                .min(actual_max_iterations - i)
                .min(num_functions - current_function);

            trace!(
                "SGD: batch [{}, {})",
                current_function,
                current_function + effective_batch_size
            );

            // Objective is measured at the pre-step iterate
            overall_objective += function.evaluate_with_gradient(
                iterate,
                current_function,
                &mut gradient,
                effective_batch_size,
            )?;
            self.update_policy
                .update(iterate, self.step_size, &gradient)?;

            i += effective_batch_size;
            current_function += effective_batch_size;
            steps += 1;
        }

        if termination == Termination::IterationLimitReached {
            info!(
                "SGD: maximum iterations ({}) reached; terminating optimization",
                self.max_iterations
            );
        }

        let objective = if termination == Termination::IterationLimitReached || self.exact_objective
        {
            self.full_objective(function, iterate, num_functions)?
        } else {
            overall_objective
        };

        Ok(OptimizationReport {
            objective,
            termination,
            points_processed: i,
            passes,
            steps,
        })
    }

    /// Objective over the whole dataset at `iterate`, evaluated batch by batch.
    fn full_objective<D, F>(
        &self,
        function: &F,
        iterate: &Array<f64, D>,
        num_functions: usize,
    ) -> OptimResult<f64>
    where
        D: Dimension,
        F: DecomposableFunction<D>,
    {
        let mut objective = 0.0;
        for begin in (0..num_functions).step_by(self.batch_size) {
            let effective_batch_size = self.batch_size.min(num_functions - begin);
            objective += function.evaluate(iterate, begin, effective_batch_size)?;
        }
        Ok(objective)
    }
}
