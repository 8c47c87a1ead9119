//! # Optimizer State Serialization
//!
//! Saves and loads QHAdam moment estimates so a run can resume with
//! `reset_policy` turned off. Uses `serde` with `bincode` as the binary format.

use crate::error::OptimResult;
use crate::optim::MomentState;
use bincode::Options;
use ndarray::Dimension;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes `state` to `path`, replacing any existing file.
pub fn save_state<D, P>(state: &MomentState<D>, path: P) -> OptimResult<()>
where
    D: Dimension + Serialize,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, state)?;
    writer.flush()?;
    Ok(())
}

/// Reads a state written by `save_state`.
///
/// The dimensionality `D` must match the one it was saved with.
pub fn load_state<D, P>(path: P) -> OptimResult<MomentState<D>>
where
    D: Dimension + DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    // A well-formed checkpoint never decodes more bytes than the file holds
    let limit = file.metadata()?.len();
    let reader = BufReader::new(file);
    let state: MomentState<D> = bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(limit)
        .deserialize_from(reader)?;
    Ok(state)
}
