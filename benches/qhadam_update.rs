use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array1, Ix1};
use qhadam::{LinearRegression, QHAdamUpdate, Separable, UpdatePolicy, SGD};

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("qhadam_update");
    for &n in &[16usize, 1024, 65536] {
        let gradient = Array1::from_shape_fn(n, |i| (i as f64 * 0.01).sin());
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut policy = QHAdamUpdate::<Ix1>::default();
            policy.initialize(Ix1(n));
            let mut theta = Array1::<f64>::zeros(n);
            b.iter(|| {
                policy
                    .update(black_box(&mut theta), 1e-3, black_box(&gradient))
                    .unwrap()
            });
        });
    }
    group.finish();
}

fn bench_driver_pass(c: &mut Criterion) {
    let rows = 4096;
    let x = ndarray::Array2::from_shape_fn((rows, 8), |(i, j)| ((i * 8 + j) as f64 * 0.013).cos());
    let y = Array1::from_shape_fn(rows, |i| (i as f64 * 0.07).sin());
    let regression = LinearRegression::new(x, y).unwrap();

    for &(name, parallel) in &[("sequential", false), ("parallel", true)] {
        let mut f = Separable::new(regression.clone()).with_parallel(parallel);
        c.bench_function(&format!("sgd_one_pass_{name}"), |b| {
            b.iter(|| {
                let mut sgd = SGD::new(1e-3, 256, rows, 1e-5, false, QHAdamUpdate::default());
                let mut theta = Array1::<f64>::zeros(8);
                sgd.optimize(&mut f, &mut theta).unwrap()
            });
        });
    }
}

criterion_group!(benches, bench_update, bench_driver_pass);
criterion_main!(benches);
