//! End-to-end: QHAdam fits a noise-free least-squares problem

use approx::assert_relative_eq;
use ndarray::{array, Array1, Array2};
use qhadam::{DecomposableFunction, LinearRegression, QHAdam, QHAdamConfig, Separable};

/// 60 rows of `[sin, cos, 1]` features with labels from `theta = [2, -1, 0.5]`.
fn dataset() -> (Array2<f64>, Array1<f64>) {
    let n = 60;
    let x = Array2::from_shape_fn((n, 3), |(i, j)| {
        let t = i as f64 * 0.37;
        match j {
            0 => t.sin(),
            1 => (1.3 * t).cos(),
            _ => 1.0,
        }
    });
    let theta = array![2.0, -1.0, 0.5];
    let y = x.dot(&theta);
    (x, y)
}

#[test]
fn test_recovers_least_squares_solution() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (x, y) = dataset();
    let mut f = Separable::new(LinearRegression::new(x, y).unwrap());

    let config = QHAdamConfig {
        step_size: 0.005,
        batch_size: 12,
        max_iterations: 600_000,
        tolerance: 1e-10,
        seed: Some(17),
        ..QHAdamConfig::default()
    };
    let mut optimizer = QHAdam::from_config(&config).unwrap();
    let mut theta = Array1::zeros(3);
    optimizer.optimize(&mut f, &mut theta).unwrap();

    assert_relative_eq!(theta[0], 2.0, epsilon = 2e-2);
    assert_relative_eq!(theta[1], -1.0, epsilon = 2e-2);
    assert_relative_eq!(theta[2], 0.5, epsilon = 2e-2);
    assert!(f.evaluate(&theta, 0, 60).unwrap() < 5e-2);
}

#[test]
fn test_sequential_and_parallel_reductions_agree() {
    let (x, y) = dataset();
    let par = Separable::new(LinearRegression::new(x.clone(), y.clone()).unwrap());
    let seq = Separable::new(LinearRegression::new(x, y).unwrap()).with_parallel(false);
    let theta = array![0.3, 0.1, -0.2];

    let mut gp = Array1::zeros(3);
    let mut gs = Array1::zeros(3);
    let fp = par.evaluate_with_gradient(&theta, 5, &mut gp, 40).unwrap();
    let fs = seq.evaluate_with_gradient(&theta, 5, &mut gs, 40).unwrap();
    assert_relative_eq!(fp, fs, epsilon = 1e-12);
    for (a, b) in gp.iter().zip(gs.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
}
