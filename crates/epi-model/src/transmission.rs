//! The `TransmissionModel` trait — whether exposures become an infection.

use epi_core::{AgentRng, Exposure, HealthTransition};

/// Pluggable infection resolution.
///
/// One timestep's worth of exposures for one agent is resolved in a *single*
/// call — the model aggregates across all of them rather than being invoked
/// once per exposure.  The result is either a stay-susceptible outcome
/// ([`HealthTransition::UNSCHEDULED`]) or an `Exposed` transition anchored at
/// a specific onset time.
///
/// One instance is shared by all agents (behind an `Arc`), so implementations
/// must be `Sync`: configuration only, with every draw going through the
/// calling agent's RNG stream.
pub trait TransmissionModel: Send + Sync {
    /// Resolve all of one agent's exposures for a timestep into one outcome.
    fn infection_outcome(
        &self,
        exposures: &[&Exposure],
        rng: &mut AgentRng,
    ) -> HealthTransition;
}
