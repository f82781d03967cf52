//! Append-only record of `(time, state)` snapshots.
//!
//! # Data layout
//!
//! Structure-of-arrays: one `times` column plus a flat `counts` buffer with
//! stride `width` (the compartment count).  Snapshot `i` is
//!
//! ```text
//! counts[ i * width .. (i + 1) * width ]
//! ```
//!
//! There is no eviction or size bound: memory grows linearly with the
//! number of events, which is the practical scaling limit for very large
//! doses or long horizons.

use pk_core::CompartmentId;

/// Time-ordered history of a single run, owned by the caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    width:  usize,
    times:  Vec<f64>,
    counts: Vec<u64>,
}

impl Trajectory {
    /// Empty trajectory for a network with `width` compartments.
    pub fn new(width: usize) -> Self {
        Self { width, times: Vec::new(), counts: Vec::new() }
    }

    /// Append one snapshot.
    ///
    /// # Panics
    /// Panics if `counts.len() != width`.  In debug builds also panics if
    /// `time` does not strictly exceed the previous snapshot's time.
    pub fn record(&mut self, time: f64, counts: &[u64]) {
        assert_eq!(counts.len(), self.width, "snapshot width mismatch");
        debug_assert!(
            self.times.last().is_none_or(|&prev| time > prev),
            "snapshot times must be strictly increasing"
        );
        self.times.push(time);
        self.counts.extend_from_slice(counts);
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Number of compartments per snapshot.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of snapshots (initial state + one per event).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of events, i.e. snapshots after the initial one.
    pub fn event_count(&self) -> usize {
        self.len().saturating_sub(1)
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn time(&self, i: usize) -> f64 {
        self.times[i]
    }

    /// Counts of snapshot `i`, indexed by `CompartmentId`.
    pub fn snapshot(&self, i: usize) -> &[u64] {
        &self.counts[i * self.width..(i + 1) * self.width]
    }

    /// Iterate `(time, counts)` in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[u64])> + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.counts.chunks_exact(self.width.max(1)))
    }

    pub fn last(&self) -> Option<(f64, &[u64])> {
        let i = self.len().checked_sub(1)?;
        Some((self.times[i], self.snapshot(i)))
    }

    pub fn final_state(&self) -> Option<&[u64]> {
        self.last().map(|(_, counts)| counts)
    }

    /// Count column of one compartment across all snapshots.
    pub fn series(&self, compartment: CompartmentId) -> impl Iterator<Item = u64> + '_ {
        let c = compartment.index();
        (0..self.len()).map(move |i| self.counts[i * self.width + c])
    }

    /// Index of the snapshot in force at time `t` (the last one recorded at
    /// or before `t`).  `None` if `t` precedes the first snapshot.
    pub fn index_at(&self, t: f64) -> Option<usize> {
        self.times.partition_point(|&x| x <= t).checked_sub(1)
    }

    /// Count of `compartment` at time `t`, reading the trajectory as a
    /// right-continuous step function.
    pub fn value_at(&self, compartment: CompartmentId, t: f64) -> Option<u64> {
        self.index_at(t)
            .map(|i| self.counts[i * self.width + compartment.index()])
    }
}
