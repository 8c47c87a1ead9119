//! # Utility Functions (`utils`)
//!
//! Visitation-order generation and optimizer state checkpoints.

pub mod serialization;
pub mod shuffle;

pub use serialization::{load_state, save_state};
pub use shuffle::ShuffleSequencer;
