//! The `VisitGenerator` trait — where an agent spends a timestep.

use epi_core::{AgentRng, Timestep, Visit};
use epi_risk::RiskScore;

/// Pluggable visit planning.
///
/// One instance per agent, queried once per timestep.  The returned visits
/// must partition `[timestep.start, timestep.end)` without gaps or overlaps,
/// in chronological order; the agent relies on that to split intervals at
/// health-state boundaries.
///
/// The agent's risk score is passed in so location choices can react to
/// policy (lockdowns, self-isolation after a positive test, and so on) via
/// [`RiskScore::visit_adjustment`].
pub trait VisitGenerator: Send {
    /// Plan this agent's visits for one timestep.
    ///
    /// Emitted visits carry `AgentUuid::INVALID` and a placeholder health
    /// state; the caller annotates them before publishing.
    fn generate_visits(
        &self,
        timestep: &Timestep,
        risk_score: &dyn RiskScore,
        rng: &mut AgentRng,
    ) -> Vec<Visit>;
}
