//! QHAdam facade: parameter plumbing and policy-state handling across runs

use ndarray::{array, Array1, Ix1};
use qhadam::{OptimResult, QHAdam, Separable, SeparableFunction, Termination};

struct Squares {
    targets: Vec<f64>,
}

impl SeparableFunction for Squares {
    type Dim = Ix1;

    fn num_functions(&self) -> usize {
        self.targets.len()
    }

    fn evaluate_one(&self, x: &Array1<f64>, i: usize) -> OptimResult<f64> {
        Ok((x[0] - self.targets[i]).powi(2))
    }

    fn add_gradient(&self, x: &Array1<f64>, i: usize, g: &mut Array1<f64>) -> OptimResult<()> {
        g[0] += 2.0 * (x[0] - self.targets[i]);
        Ok(())
    }
}

fn objective() -> Separable<Squares> {
    Separable::new(Squares { targets: vec![1.0, 2.0, 3.0, 4.0] })
}

fn small(reset_policy: bool) -> QHAdam<Ix1> {
    QHAdam::new(0.01, 2, 0.7, 1.0, 0.9, 0.999, 1e-8, 4, 1e-9, false, reset_policy)
}

#[test]
fn test_new_stores_every_parameter() {
    let q = QHAdam::<Ix1>::new(0.3, 7, 0.1, 0.2, 0.5, 0.6, 1e-4, 99, 1e-2, false, false);
    assert_eq!(q.step_size(), 0.3);
    assert_eq!(q.batch_size(), 7);
    assert_eq!(q.v1(), 0.1);
    assert_eq!(q.v2(), 0.2);
    assert_eq!(q.beta1(), 0.5);
    assert_eq!(q.beta2(), 0.6);
    assert_eq!(q.epsilon(), 1e-4);
    assert_eq!(q.max_iterations(), 99);
    assert_eq!(q.tolerance(), 1e-2);
    assert!(!q.shuffle());
    assert!(!q.reset_policy());
}

#[test]
fn test_setters_round_trip() {
    let mut q = QHAdam::<Ix1>::default();
    q.set_step_size(0.02);
    q.set_batch_size(3);
    q.set_max_iterations(0);
    q.set_tolerance(1e-7);
    q.set_shuffle(false);
    q.set_reset_policy(false);
    q.set_exact_objective(true);
    assert_eq!(q.step_size(), 0.02);
    assert_eq!(q.batch_size(), 3);
    assert_eq!(q.max_iterations(), 0);
    assert_eq!(q.tolerance(), 1e-7);
    assert!(!q.shuffle());
    assert!(!q.reset_policy());
    assert!(q.exact_objective());
}

#[test]
fn test_reset_policy_restarts_moment_counter() {
    let mut q = small(true);
    let mut f = objective();
    q.optimize(&mut f, &mut array![0.0]).unwrap();
    q.optimize(&mut f, &mut array![0.0]).unwrap();
    assert_eq!(q.update_policy().iteration(), 2);
}

#[test]
fn test_retained_policy_continues_moment_counter() {
    let mut q = small(false);
    let mut f = objective();
    q.optimize(&mut f, &mut array![0.0]).unwrap();
    q.optimize(&mut f, &mut array![0.0]).unwrap();
    assert_eq!(q.update_policy().iteration(), 4);
}

#[test]
fn test_optimize_moves_toward_mean() {
    let mut q = small(true);
    q.set_max_iterations(0);
    q.set_step_size(0.05);
    q.set_tolerance(1e-4);
    q.set_batch_size(4);
    let mut x = array![0.0];
    let report = q.optimize_with_report(&mut objective(), &mut x).unwrap();
    assert_eq!(report.termination, Termination::Converged);
    assert!((x[0] - 2.5).abs() < 0.1, "x = {}", x[0]);
}
