//! Simulation observer trait for progress reporting and data collection.

use pk_core::ReactionId;
use pk_network::SystemState;

use crate::RunSummary;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the event loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  The observer sees the state read-only; the
/// authoritative history is still the caller's [`Trajectory`][crate::Trajectory].
///
/// # Example — event counter
///
/// ```rust,ignore
/// struct FiringCounter { per_reaction: Vec<u64> }
///
/// impl SimObserver for FiringCounter {
///     fn on_event(&mut self, _time: f64, reaction: ReactionId, _state: &SystemState) {
///         self.per_reaction[reaction.index()] += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once when the run leaves `Idle`, after the initial snapshot is
    /// recorded.
    fn on_start(&mut self, _time: f64, _state: &SystemState) {}

    /// Called after every event, with the post-event state.
    fn on_event(&mut self, _time: f64, _reaction: ReactionId, _state: &SystemState) {}

    /// Called once when the run reaches `Terminated`.
    fn on_terminate(&mut self, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
