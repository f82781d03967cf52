//! The `Simulation` struct and its Gillespie event loop.

use pk_core::{ReactionId, SimConfig, SimRng};
use pk_network::{propensity, Propensities, ReactionNetwork, SystemState};

use crate::{SimError, SimObserver, SimResult, Trajectory};

/// Waiting-time draws retried before giving up when `t + dt` rounds to `t`.
const MAX_TIME_DRAWS: u32 = 64;

// ── State machine ─────────────────────────────────────────────────────────────

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Total propensity was zero: no reaction could fire.
    NoPropensity,
    /// The last event's time reached the configured horizon.
    HorizonReached,
    /// `SimConfig::max_events` events were generated.
    EventLimit,
}

impl TerminationReason {
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationReason::NoPropensity   => "no_propensity",
            TerminationReason::HorizonReached => "horizon_reached",
            TerminationReason::EventLimit     => "event_limit",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a [`Simulation`].  `Terminated` is absorbing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepperState {
    Idle,
    Advancing,
    Terminated(TerminationReason),
}

/// Outcome of one [`Simulation::step`] call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    /// One reaction fired and a snapshot was recorded.
    Fired { time: f64, reaction: ReactionId },
    /// The run is over; no snapshot was recorded by this call.
    Terminated(TerminationReason),
}

/// Final bookkeeping of a terminated run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub events:     u64,
    pub final_time: f64,
    pub reason:     TerminationReason,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// Gillespie direct-method stepper over a [`ReactionNetwork`].
///
/// Each [`step`][Self::step] performs one iteration:
///
/// 1. Recompute propensities and their total `a0`.
/// 2. If `a0 == 0`, terminate (`NoPropensity`) without recording.
/// 3. Draw `r1 ∈ (0, 1)` and `r2 ∈ [0, 1)`.
/// 4. Advance time by `dt = -ln(r1) / a0`.
/// 5. Select the first reaction whose cumulative propensity exceeds `r2 * a0`.
/// 6. Move one molecule from its source to its destination (clamped at 0).
/// 7. Record `(time, state)` into the caller's trajectory.
/// 8. If `time >= horizon`, terminate (`HorizonReached`).
///
/// The caller owns the [`Trajectory`]; the simulation only appends to it.
/// Create via [`SimBuilder`][crate::SimBuilder].
///
/// Configuration and state are fixed by the builder and readable through
/// [`config`][Self::config] and [`state`][Self::state]; neither can be
/// replaced once the simulation exists:
///
/// ```rust,compile_fail
/// use pk_core::SimConfig;
/// use pk_network::{presets, SystemState};
/// use pk_ssa::SimBuilder;
///
/// let network = presets::two_compartment(0.5, 0.5).unwrap();
/// let mut sim = SimBuilder::new(&network, SimConfig::new(100, "Heart", 20.0, 1))
///     .build()
///     .unwrap();
/// sim.state = SystemState::from_counts(vec![7, 3]);
/// ```
///
/// ```rust,compile_fail
/// use pk_core::SimConfig;
/// use pk_network::presets;
/// use pk_ssa::SimBuilder;
///
/// let network = presets::two_compartment(0.5, 0.5).unwrap();
/// let mut sim = SimBuilder::new(&network, SimConfig::new(100, "Heart", 20.0, 1))
///     .build()
///     .unwrap();
/// sim.config.horizon = f64::NAN;
/// ```
pub struct Simulation<'n> {
    /// The network being simulated (read-only).
    pub network: &'n ReactionNetwork,

    pub(crate) config:       SimConfig,
    pub(crate) state:        SystemState,
    pub(crate) time:         f64,
    pub(crate) events:       u64,
    pub(crate) phase:        StepperState,
    pub(crate) rng:          SimRng,
    pub(crate) propensities: Propensities,
}

impl<'n> Simulation<'n> {
    // ── Accessors ─────────────────────────────────────────────────────────

    /// Run configuration (dose, source, horizon, seed, event cap).
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current molecule counts.  Only the stepper mutates them.
    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Events fired so far.
    pub fn events(&self) -> u64 {
        self.events
    }

    pub fn phase(&self) -> StepperState {
        self.phase
    }

    /// Empty trajectory sized for this network.
    pub fn new_trajectory(&self) -> Trajectory {
        Trajectory::new(self.network.compartment_count())
    }

    /// Summary of the run, once it has terminated.
    pub fn summary(&self) -> Option<RunSummary> {
        match self.phase {
            StepperState::Terminated(reason) => Some(RunSummary {
                events:     self.events,
                final_time: self.time,
                reason,
            }),
            _ => None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// `Idle → Advancing`: reset the clock to 0 and record the initial
    /// snapshot.  No-op if the run has already started.
    ///
    /// # Errors
    /// [`SimError::TrajectoryWidth`] if `trajectory` was sized for a
    /// different network, [`SimError::Config`] if it already holds data.
    pub fn start(&mut self, trajectory: &mut Trajectory) -> SimResult<()> {
        if self.phase != StepperState::Idle {
            return Ok(());
        }
        if trajectory.width() != self.network.compartment_count() {
            return Err(SimError::TrajectoryWidth {
                expected: self.network.compartment_count(),
                got:      trajectory.width(),
            });
        }
        if !trajectory.is_empty() {
            return Err(SimError::Config("trajectory must be empty at start".into()));
        }

        self.time = 0.0;
        trajectory.record(self.time, self.state.counts());
        self.phase = StepperState::Advancing;

        log::debug!(
            "ssa start: {} molecules in {:?}, horizon {}",
            self.config.dose,
            self.config.source,
            self.config.horizon
        );
        Ok(())
    }

    /// Perform one event (starting the run first if it is still `Idle`).
    pub fn step(&mut self, trajectory: &mut Trajectory) -> SimResult<Step> {
        match self.phase {
            StepperState::Idle => self.start(trajectory)?,
            StepperState::Terminated(reason) => return Ok(Step::Terminated(reason)),
            StepperState::Advancing => {}
        }

        // ── Caller-imposed event cap ──────────────────────────────────────
        if self.config.max_events.is_some_and(|cap| self.events >= cap) {
            return Ok(self.terminate(TerminationReason::EventLimit));
        }

        // ── ① Propensities ────────────────────────────────────────────────
        propensity::compute_into(self.network, &self.state, &mut self.propensities);
        let a0 = self.propensities.total;

        // ── ② Nothing can fire ────────────────────────────────────────────
        if a0 == 0.0 {
            return Ok(self.terminate(TerminationReason::NoPropensity));
        }

        // ── ③④ Waiting time ───────────────────────────────────────────────
        let next_time = self.draw_next_time(a0)?;

        // ── ⑤ Reaction selection ──────────────────────────────────────────
        let r2 = self.rng.unit();
        let Some(reaction_id) = self.propensities.select(r2) else {
            return Ok(self.terminate(TerminationReason::NoPropensity));
        };
        let reaction = self.network.reactions()[reaction_id.index()];

        // ── ⑥⑦ Apply (source clamped at zero) ─────────────────────────────
        self.time = next_time;
        if !self.state.apply(&reaction) {
            log::warn!(
                "reaction {} selected with empty source {} at t = {}; state left unchanged",
                reaction_id,
                self.network.compartment_name(reaction.source),
                self.time
            );
        }
        self.events += 1;

        // ── ⑧ Record ──────────────────────────────────────────────────────
        trajectory.record(self.time, self.state.counts());
        log::trace!("t = {:.6} fired {}", self.time, reaction_id);

        // ── ⑨ Horizon ─────────────────────────────────────────────────────
        if self.time >= self.config.horizon {
            self.phase = StepperState::Terminated(TerminationReason::HorizonReached);
            log::debug!("ssa horizon reached after {} events at t = {}", self.events, self.time);
        }

        Ok(Step::Fired { time: self.time, reaction: reaction_id })
    }

    /// Run from the current position until the run terminates.
    ///
    /// Calls observer hooks at start, after every event, and at termination.
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    /// On an already terminated run this returns the existing summary and
    /// calls no hooks.
    pub fn run<O: SimObserver>(
        &mut self,
        trajectory: &mut Trajectory,
        observer:   &mut O,
    ) -> SimResult<RunSummary> {
        if let Some(summary) = self.summary() {
            return Ok(summary);
        }
        if self.phase == StepperState::Idle {
            self.start(trajectory)?;
            observer.on_start(self.time, &self.state);
        }

        let reason = loop {
            match self.step(trajectory)? {
                Step::Fired { time, reaction } => observer.on_event(time, reaction, &self.state),
                Step::Terminated(reason) => break reason,
            }
        };

        let summary = RunSummary {
            events:     self.events,
            final_time: self.time,
            reason,
        };
        observer.on_terminate(&summary);
        Ok(summary)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Sample `t + dt` with `dt = -ln(r1) / a0`, `r1 ∈ (0, 1)`.
    ///
    /// `r1` never hits 0, so `dt` is finite and positive.  When `dt` is below
    /// the float resolution at the current time the draw is retried, so
    /// recorded times stay strictly increasing.
    fn draw_next_time(&mut self, a0: f64) -> SimResult<f64> {
        for _ in 0..MAX_TIME_DRAWS {
            let r1 = self.rng.open_unit();
            let next = self.time + (-r1.ln() / a0);
            if next > self.time && next.is_finite() {
                return Ok(next);
            }
        }
        Err(SimError::TimeResolution {
            time:             self.time,
            total_propensity: a0,
        })
    }

    fn terminate(&mut self, reason: TerminationReason) -> Step {
        self.phase = StepperState::Terminated(reason);
        log::debug!("ssa terminated ({reason}) after {} events at t = {}", self.events, self.time);
        Step::Terminated(reason)
    }
}

/// One-call convenience: build a simulation, run it to termination, and
/// return its trajectory.
pub fn simulate(network: &ReactionNetwork, config: SimConfig) -> SimResult<Trajectory> {
    let mut sim = crate::SimBuilder::new(network, config).build()?;
    let mut trajectory = sim.new_trajectory();
    sim.run(&mut trajectory, &mut crate::NoopObserver)?;
    Ok(trajectory)
}
