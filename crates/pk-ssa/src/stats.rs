//! Summary statistics over recorded trajectories.
//!
//! A trajectory is read as a right-continuous step function: snapshot `i`
//! holds on `[t_i, t_{i+1})`, and the last snapshot holds indefinitely (the
//! state is frozen once the run terminates).

use pk_core::CompartmentId;

use crate::{EnsembleRun, Trajectory};

/// Time-weighted mean count of `compartment` over `[from, to]`.
///
/// Returns `None` if the window is empty (`to <= from`), unbounded, or starts
/// before the first snapshot.
pub fn time_average(
    trajectory:  &Trajectory,
    compartment: CompartmentId,
    from:        f64,
    to:          f64,
) -> Option<f64> {
    if !from.is_finite() || !to.is_finite() || to <= from {
        return None;
    }
    let first = trajectory.index_at(from)?;
    let c = compartment.index();

    let mut area = 0.0;
    let mut i = first;
    let mut left = from;
    while left < to {
        let right = if i + 1 < trajectory.len() {
            trajectory.time(i + 1).min(to)
        } else {
            to
        };
        area += trajectory.snapshot(i)[c] as f64 * (right - left);
        left = right;
        i += 1;
    }
    Some(area / (to - from))
}

/// [`time_average`] divided by the molecule total of the initial snapshot,
/// i.e. the mean share of the dose held by `compartment`.
pub fn fraction_time_average(
    trajectory:  &Trajectory,
    compartment: CompartmentId,
    from:        f64,
    to:          f64,
) -> Option<f64> {
    if trajectory.is_empty() {
        return None;
    }
    let total: u64 = trajectory.snapshot(0).iter().sum();
    if total == 0 {
        return None;
    }
    time_average(trajectory, compartment, from, to).map(|avg| avg / total as f64)
}

/// Sample the step function of `compartment` at each grid time.
///
/// Grid times before the first snapshot yield `None`.
pub fn sample_on_grid(
    trajectory:  &Trajectory,
    compartment: CompartmentId,
    grid:        &[f64],
) -> Vec<Option<u64>> {
    grid.iter()
        .map(|&t| trajectory.value_at(compartment, t))
        .collect()
}

/// Mean final count of each compartment across ensemble members.
///
/// Returns an empty vec for an empty ensemble.
pub fn mean_final_counts(runs: &[EnsembleRun]) -> Vec<f64> {
    let Some(width) = runs.first().map(|r| r.trajectory.width()) else {
        return Vec::new();
    };
    let mut sums = vec![0.0; width];
    for run in runs {
        if let Some(counts) = run.trajectory.final_state() {
            for (sum, &n) in sums.iter_mut().zip(counts) {
                *sum += n as f64;
            }
        }
    }
    sums.iter().map(|s| s / runs.len() as f64).collect()
}
