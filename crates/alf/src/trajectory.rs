//! features over every frame of a trajectory, in parallel

use std::sync::{Mutex, PoisonError};

use atoms::{Atoms, Trajectory, Unit};
use log::warn;
use rayon::prelude::*;

use crate::{Alf, AlfCache, AlfError, AlfMethod, Mat3, c_matrix, features};

/// The local frame and features of one atom in one frame
#[derive(Clone, Debug, PartialEq)]
pub struct AtomFrame {
    pub alf: Alf,
    pub c_matrix: Mat3,
    pub features: Vec<f64>,
}

/// call `rayon::ThreadPoolBuilder` to set `num_threads` to `n`, with 0 meaning
/// one thread per CPU. Discards the error returned by `build_global` if the
/// thread pool has already been initialized
pub fn max_threads(n: usize) {
    let _ = rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build_global();
}

/// compute the ALF, C matrix, and features of atom `atom` in `frame`, looking
/// the ALF up in `cache` first. the cache lock is held across the whole
/// lookup so concurrent misses for the same key compute it only once
pub fn process_frame(
    frame: &Atoms,
    atom: usize,
    method: AlfMethod,
    unit: Unit,
    cache: &Mutex<AlfCache>,
) -> Result<AtomFrame, AlfError> {
    let alf = cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_compute(frame, atom, method)?;
    let c_matrix = c_matrix(frame, &alf)?;
    let features = features(frame, &alf, &c_matrix, unit)?;
    Ok(AtomFrame {
        alf,
        c_matrix,
        features,
    })
}

/// compute [process_frame] for atom `atom` over every frame of `trajectory`
/// in parallel, sharing `cache` between the workers. the results are in frame
/// order. failing frames are logged and one of their errors is returned
pub fn trajectory_features(
    trajectory: &Trajectory,
    atom: usize,
    method: AlfMethod,
    unit: Unit,
    cache: &Mutex<AlfCache>,
) -> Result<Vec<AtomFrame>, AlfError> {
    trajectory
        .frames
        .par_iter()
        .enumerate()
        .map(|(f, frame)| {
            process_frame(frame, atom, method, unit, cache).inspect_err(|e| {
                warn!("rejected frame {f} for atom {}: {e}", atom + 1)
            })
        })
        .collect()
}
