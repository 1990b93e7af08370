//! Simulation observer trait for progress reporting and data collection.

use std::fmt;

use epi_core::{HealthState, Timestep};

// ── HealthCensus ──────────────────────────────────────────────────────────────

/// Population counts by health state at one point in time.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct HealthCensus {
    pub susceptible: usize,
    pub exposed: usize,
    pub infectious: usize,
    pub recovered: usize,
}

impl HealthCensus {
    pub fn count(&mut self, state: HealthState) {
        match state {
            HealthState::Susceptible => self.susceptible += 1,
            HealthState::Exposed => self.exposed += 1,
            HealthState::Infectious => self.infectious += 1,
            HealthState::Recovered => self.recovered += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.susceptible + self.exposed + self.infectious + self.recovered
    }

    /// Agents currently carrying the pathogen.
    pub fn infected(&self) -> usize {
        self.exposed + self.infectious
    }
}

impl fmt::Display for HealthCensus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S={} E={} I={} R={}",
            self.susceptible, self.exposed, self.infectious, self.recovered
        )
    }
}

// ── SimObserver ───────────────────────────────────────────────────────────────

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at
/// timestep boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — epidemic curve printer
///
/// ```rust,ignore
/// struct CurvePrinter;
///
/// impl SimObserver for CurvePrinter {
///     fn on_timestep_end(&mut self, timestep: &Timestep, census: &HealthCensus) {
///         println!("{timestep}: {census}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before any phase of a timestep runs.
    fn on_timestep_start(&mut self, _timestep: &Timestep) {}

    /// Called after all three phases of a timestep complete, with the
    /// population census at that point.
    fn on_timestep_end(&mut self, _timestep: &Timestep, _census: &HealthCensus) {}

    /// Called once after the final timestep completes.
    fn on_sim_end(&mut self, _census: &HealthCensus) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
