//! SEIR health states and timestamped transitions.

use std::fmt;

use crate::SimTime;

// ── HealthState ───────────────────────────────────────────────────────────────

/// Disease progression state of one agent.
///
/// The canonical SEIR chain is Susceptible → Exposed → Infectious → Recovered,
/// but the engine only assumes that `Susceptible` is the sole state accepting
/// new infection attempts; the actual chain is whatever the configured
/// transition model produces.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthState {
    #[default]
    Susceptible,
    Exposed,
    Infectious,
    /// Terminal: recovered or otherwise removed from the epidemic.
    Recovered,
}

impl HealthState {
    /// `true` for states carrying the pathogen (Exposed or Infectious).
    #[inline]
    pub fn is_infected(self) -> bool {
        matches!(self, HealthState::Exposed | HealthState::Infectious)
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HealthState::Susceptible => "susceptible",
            HealthState::Exposed => "exposed",
            HealthState::Infectious => "infectious",
            HealthState::Recovered => "recovered",
        };
        f.write_str(name)
    }
}

// ── HealthTransition ──────────────────────────────────────────────────────────

/// "The state becomes `health_state` at `time`."
///
/// An agent holds its *current* transition (already applied) and its *next*
/// transition (pending).  A pending transition at
/// [`SimTime::INFINITE_FUTURE`] means no further transition is scheduled,
/// e.g. permanently susceptible this round.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthTransition {
    pub time: SimTime,
    pub health_state: HealthState,
}

impl HealthTransition {
    /// The unscheduled-susceptible sentinel.
    pub const UNSCHEDULED: HealthTransition = HealthTransition {
        time: SimTime::INFINITE_FUTURE,
        health_state: HealthState::Susceptible,
    };

    #[inline]
    pub fn new(time: SimTime, health_state: HealthState) -> Self {
        Self { time, health_state }
    }
}

impl fmt::Display for HealthTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.health_state, self.time)
    }
}
