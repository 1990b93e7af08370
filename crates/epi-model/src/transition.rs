//! The `TransitionModel` trait — how disease progresses within one agent.

use epi_core::{AgentRng, HealthTransition};

/// Pluggable health-state progression.
///
/// Given the agent's latest applied transition, produce the next one: which
/// state follows and when.  Called by the agent whenever it applies a
/// transition, so implementations see the full chain one hop at a time.
///
/// Implementations must not keep per-agent mutable state; anything stochastic
/// draws from the supplied per-agent RNG so that distinct agents' chains are
/// independent and reproducible.
pub trait TransitionModel: Send {
    /// The transition following `latest`.
    ///
    /// A terminal state (no outgoing transitions) is expressed by returning
    /// the same state at [`SimTime::INFINITE_FUTURE`][epi_core::SimTime].
    fn next_health_transition(
        &self,
        latest: &HealthTransition,
        rng: &mut AgentRng,
    ) -> HealthTransition;
}
