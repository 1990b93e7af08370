//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as whole seconds since the simulation epoch, stored in
//! an `i64`.  Health transitions can be scheduled before the epoch (an agent
//! may enter the simulation mid-incubation), so times are signed, and two
//! sentinels exist:
//!
//! - `SimTime::INFINITE_PAST` — "before everything"; the timestamp of the
//!   susceptible start state.
//! - `SimTime::INFINITE_FUTURE` — "never"; the timestamp of a transition that
//!   is not scheduled.
//!
//! All arithmetic saturates so that the sentinels are absorbing: adding any
//! latency to `INFINITE_FUTURE` stays `INFINITE_FUTURE`.
//!
//! A [`Timestep`] is the driver-owned window `[start, start + duration)`; the
//! per-agent engine never mutates it.

use std::fmt;

use crate::{AgentRng, AgentUuid};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation time in seconds since the simulation epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub i64);

impl SimTime {
    /// The simulation epoch (t = 0).
    pub const EPOCH: SimTime = SimTime(0);
    /// Sentinel: before any representable time.
    pub const INFINITE_PAST: SimTime = SimTime(i64::MIN);
    /// Sentinel: after any representable time ("not scheduled").
    pub const INFINITE_FUTURE: SimTime = SimTime(i64::MAX);

    #[inline]
    pub fn from_seconds(secs: i64) -> SimTime {
        SimTime(secs)
    }

    #[inline]
    pub fn from_hours(hours: i64) -> SimTime {
        SimTime(hours * 3_600)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self != Self::INFINITE_PAST && self != Self::INFINITE_FUTURE
    }
}

impl std::ops::Add<SimDuration> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: SimDuration) -> SimTime {
        SimTime(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub<SimDuration> for SimTime {
    type Output = SimTime;
    #[inline]
    fn sub(self, rhs: SimDuration) -> SimTime {
        SimTime(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Sub for SimTime {
    type Output = SimDuration;
    #[inline]
    fn sub(self, rhs: SimTime) -> SimDuration {
        SimDuration(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::INFINITE_PAST => write!(f, "-inf"),
            Self::INFINITE_FUTURE => write!(f, "+inf"),
            SimTime(secs) => write!(f, "{secs}s"),
        }
    }
}

// ── SimDuration ───────────────────────────────────────────────────────────────

/// A span of simulation time in seconds.  Signed: subtracting two `SimTime`s
/// may yield a negative span.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimDuration(pub i64);

impl SimDuration {
    pub const ZERO: SimDuration = SimDuration(0);
    /// Sentinel used for "no latency bound" (e.g. a test that never returns).
    pub const INFINITE: SimDuration = SimDuration(i64::MAX);

    #[inline]
    pub fn seconds(secs: i64) -> SimDuration {
        SimDuration(secs)
    }

    #[inline]
    pub fn minutes(mins: i64) -> SimDuration {
        SimDuration(mins * 60)
    }

    #[inline]
    pub fn hours(hours: i64) -> SimDuration {
        SimDuration(hours * 3_600)
    }

    #[inline]
    pub fn days(days: i64) -> SimDuration {
        SimDuration(days * 86_400)
    }

    /// Whole minutes contained in this span (truncating).
    #[inline]
    pub fn whole_minutes(self) -> i64 {
        self.0 / 60
    }

    /// This span expressed as fractional seconds.
    #[inline]
    pub fn as_secs_f32(self) -> f32 {
        self.0 as f32
    }

    /// Scale by a non-negative fraction, rounding toward zero.
    #[inline]
    pub fn mul_f32(self, factor: f32) -> SimDuration {
        SimDuration((self.0 as f32 * factor) as i64)
    }
}

impl std::ops::Add for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn add(self, rhs: SimDuration) -> SimDuration {
        SimDuration(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for SimDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

// ── Timestep ──────────────────────────────────────────────────────────────────

/// One discrete simulation window `[start, start + duration)`.
///
/// Owned and advanced by the driver loop; passed by reference into every
/// per-agent call and never mutated by the agent engine.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestep {
    start: SimTime,
    duration: SimDuration,
}

impl Timestep {
    /// Construct a window starting at `start`.
    ///
    /// # Panics
    /// Panics in debug mode if `duration` is not strictly positive.
    pub fn new(start: SimTime, duration: SimDuration) -> Self {
        debug_assert!(duration > SimDuration::ZERO, "timestep duration must be > 0");
        Self { start, duration }
    }

    #[inline]
    pub fn start_time(&self) -> SimTime {
        self.start
    }

    #[inline]
    pub fn duration(&self) -> SimDuration {
        self.duration
    }

    /// Exclusive upper bound of the window.
    #[inline]
    pub fn end_time(&self) -> SimTime {
        self.start + self.duration
    }

    /// `true` if `time` falls within `[start, end)`.
    #[inline]
    pub fn contains(&self, time: SimTime) -> bool {
        self.start <= time && time < self.end_time()
    }

    /// Slide the window forward by its own duration.
    #[inline]
    pub fn advance(&mut self) {
        self.start = self.start + self.duration;
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end_time())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate and passed
/// to the driver builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Start of the first timestep.
    pub start_time: SimTime,

    /// Length of every timestep.  Default in practice: 24 h.
    pub timestep_duration: SimDuration,

    /// Total timesteps to simulate.
    pub num_timesteps: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// Construct the first timestep of this run.
    #[inline]
    pub fn first_timestep(&self) -> Timestep {
        Timestep::new(self.start_time, self.timestep_duration)
    }

    /// Derive the RNG stream for one agent from the master seed.
    ///
    /// Constructing every agent's RNG through this method makes the whole
    /// run a pure function of `seed`: two runs with equal configs and
    /// populations produce identical trajectories.
    #[inline]
    pub fn agent_rng(&self, uuid: AgentUuid) -> AgentRng {
        AgentRng::new(self.seed, uuid)
    }
}
