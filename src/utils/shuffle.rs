//! # Visitation Order
//!
//! Produces the order in which the separable functions of an objective are
//! visited during one pass over the dataset.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Generates identity or uniformly permuted visitation orders.
///
/// A new order is drawn once per full pass; the sequencer owns its RNG so
/// two sequencers built with the same seed yield the same sequence of orders.
#[derive(Debug, Clone)]
pub struct ShuffleSequencer {
    rng: StdRng,
}

impl ShuffleSequencer {
    /// Sequencer seeded from OS entropy.
    pub fn new() -> Self {
        ShuffleSequencer { rng: StdRng::from_entropy() }
    }

    /// Sequencer with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        ShuffleSequencer { rng: StdRng::seed_from_u64(seed) }
    }

    /// Reseeds the underlying generator.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Returns the order for the next pass over `n` functions.
    ///
    /// With `shuffle == false` this is always `0..n`; otherwise a fresh
    /// uniform permutation (Fisher-Yates).
    pub fn order(&mut self, n: usize, shuffle: bool) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        if shuffle {
            order.shuffle(&mut self.rng);
        }
        order
    }
}

impl Default for ShuffleSequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks that `order` is a permutation of `0..n`.
pub fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &idx in order {
        if idx >= n || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_without_shuffle() {
        let mut seq = ShuffleSequencer::seeded(7);
        assert_eq!(seq.order(5, false), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn shuffled_order_is_permutation() {
        let mut seq = ShuffleSequencer::seeded(11);
        for _ in 0..20 {
            let order = seq.order(50, true);
            assert!(is_permutation(&order, 50));
        }
    }

    #[test]
    fn seeded_sequencers_agree() {
        let mut a = ShuffleSequencer::seeded(42);
        let mut b = ShuffleSequencer::seeded(42);
        for _ in 0..5 {
            assert_eq!(a.order(30, true), b.order(30, true));
        }
    }

    #[test]
    fn reshuffles_each_pass() {
        let mut seq = ShuffleSequencer::seeded(3);
        let first = seq.order(100, true);
        let second = seq.order(100, true);
        // 100! orders; a repeat would mean the RNG is not advancing
        assert_ne!(first, second);
    }

    #[test]
    fn empty_order() {
        let mut seq = ShuffleSequencer::seeded(1);
        assert!(seq.order(0, true).is_empty());
    }

    #[test]
    fn permutation_check_rejects_duplicates() {
        assert!(!is_permutation(&[0, 0, 2], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(is_permutation(&[2, 0, 1], 3));
    }
}
