//! Checkpointing QHAdam moment state with bincode

use ndarray::{array, Ix1, Ix2};
use qhadam::utils::{load_state, save_state};
use qhadam::{MomentState, QHAdamUpdate, UpdatePolicy};

#[test]
fn test_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moments.bin");

    let mut policy = QHAdamUpdate::<Ix1>::default();
    let mut theta = array![0.5, -0.5, 1.0];
    for g in [array![0.1, 0.2, -0.3], array![0.4, -0.1, 0.0]] {
        policy.update(&mut theta, 0.01, &g).unwrap();
    }

    let state = policy.state().unwrap();
    save_state(state, &path).unwrap();
    let loaded: MomentState<Ix1> = load_state(&path).unwrap();
    assert_eq!(&loaded, state);
    assert_eq!(loaded.iteration, 2);
}

#[test]
fn test_restored_policy_continues_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moments.bin");

    let mut original = QHAdamUpdate::<Ix2>::default();
    let mut theta = array![[1.0, 2.0], [3.0, 4.0]];
    original.update(&mut theta, 0.05, &array![[0.3, -0.2], [0.1, 0.9]]).unwrap();
    save_state(original.state().unwrap(), &path).unwrap();

    let mut resumed = QHAdamUpdate::<Ix2>::default();
    resumed.restore(load_state(&path).unwrap()).unwrap();

    let grad = array![[-0.5, 0.5], [0.2, 0.0]];
    let mut a = theta.clone();
    let mut b = theta;
    original.update(&mut a, 0.05, &grad).unwrap();
    resumed.update(&mut b, 0.05, &grad).unwrap();
    assert_eq!(a, b);
    assert_eq!(resumed.iteration(), 2);
}
