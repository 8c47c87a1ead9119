//! # Per-Example Objectives
//!
//! `Separable` turns an objective defined one example at a time into a
//! `DecomposableFunction`, owning the visitation order and reducing each
//! batch either sequentially or across the rayon thread pool.

use super::DecomposableFunction;
use crate::error::{OptimError, OptimResult};
use crate::utils::shuffle::is_permutation;
use ndarray::{Array, Dimension};
use rayon::prelude::*;

/// An objective given by its individual terms `f_i`.
pub trait SeparableFunction: Sync {
    /// Dimensionality of the iterate.
    type Dim: Dimension;

    fn num_functions(&self) -> usize;

    /// Value of term `index` at `iterate`.
    fn evaluate_one(&self, iterate: &Array<f64, Self::Dim>, index: usize) -> OptimResult<f64>;

    /// Adds the gradient of term `index` into `gradient`.
    fn add_gradient(
        &self,
        iterate: &Array<f64, Self::Dim>,
        index: usize,
        gradient: &mut Array<f64, Self::Dim>,
    ) -> OptimResult<()>;
}

/// Adapter from `SeparableFunction` to `DecomposableFunction`.
#[derive(Debug, Clone)]
pub struct Separable<F> {
    function: F,
    order: Vec<usize>,
    parallel: bool,
}

impl<F> Separable<F> {
    /// Wraps `function` with the identity order and parallel reduction on.
    pub fn new(function: F) -> Self
    where
        F: SeparableFunction,
    {
        let order = (0..function.num_functions()).collect();
        Separable { function, order, parallel: true }
    }

    /// Selects rayon (`true`) or in-order sequential (`false`) reduction.
    /// Sequential summation is bit-reproducible across thread counts.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn inner(&self) -> &F {
        &self.function
    }

    pub fn into_inner(self) -> F {
        self.function
    }

    /// Current visitation order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    fn batch(&self, begin: usize, batch_size: usize) -> OptimResult<&[usize]> {
        let end = begin.checked_add(batch_size);
        match end {
            Some(end) if end <= self.order.len() => Ok(&self.order[begin..end]),
            _ => Err(OptimError::IndexOutOfRange {
                begin,
                batch_size,
                num_functions: self.order.len(),
            }),
        }
    }
}

impl<D, F> DecomposableFunction<D> for Separable<F>
where
    D: Dimension,
    F: SeparableFunction<Dim = D>,
{
    fn num_functions(&self) -> usize {
        self.order.len()
    }

    fn evaluate(
        &self,
        iterate: &Array<f64, D>,
        begin: usize,
        batch_size: usize,
    ) -> OptimResult<f64> {
        let indices = self.batch(begin, batch_size)?;
        if self.parallel {
            indices
                .par_iter()
                .map(|&i| self.function.evaluate_one(iterate, i))
                .try_reduce(|| 0.0, |a, b| Ok(a + b))
        } else {
            indices
                .iter()
                .try_fold(0.0, |acc, &i| {
                    Ok::<f64, OptimError>(acc + self.function.evaluate_one(iterate, i)?)
                })
        }
    }

    fn gradient(
        &self,
        iterate: &Array<f64, D>,
        begin: usize,
        gradient: &mut Array<f64, D>,
        batch_size: usize,
    ) -> OptimResult<()> {
        let indices = self.batch(begin, batch_size)?;
        if self.parallel {
            let dim = gradient.raw_dim();
            let total = indices
                .par_iter()
                .try_fold(
                    || Array::zeros(dim.clone()),
                    |mut acc, &i| {
                        self.function.add_gradient(iterate, i, &mut acc)?;
                        Ok::<_, OptimError>(acc)
                    },
                )
                .try_reduce(
                    || Array::zeros(dim.clone()),
                    |mut a, b| {
                        a += &b;
                        Ok(a)
                    },
                )?;
            gradient.assign(&total);
        } else {
            gradient.fill(0.0);
            for &i in indices {
                self.function.add_gradient(iterate, i, gradient)?;
            }
        }
        Ok(())
    }

    fn shuffle(&mut self, order: &[usize]) -> OptimResult<()> {
        if !is_permutation(order, self.order.len()) {
            return Err(OptimError::InvalidOrder {
                expected: self.order.len(),
                got: order.len(),
            });
        }
        self.order.clear();
        self.order.extend_from_slice(order);
        Ok(())
    }
}
