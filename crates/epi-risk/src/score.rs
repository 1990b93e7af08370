//! The `RiskScore` trait and its policy value objects.

use epi_core::{
    Contact, Exposure, HealthTransition, LocationUuid, SimDuration, SimTime, TestResult, Timestep,
};

// ── Policy value objects ──────────────────────────────────────────────────────

/// How an agent should scale its visits to one location.
///
/// Note that different agents can carry different policies: an essential
/// employee may see no adjustment where a non-essential employee is banned
/// from the same location entirely.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitAdjustment {
    /// Probability in [0, 1] that a visit to this location happens at all.
    pub frequency_adjustment: f32,
    /// Linear scale on the mean sampled visit duration, in [0, 1].
    pub duration_adjustment: f32,
}

impl Default for VisitAdjustment {
    /// No adjustment: visit as originally planned.
    fn default() -> Self {
        Self { frequency_adjustment: 1.0, duration_adjustment: 1.0 }
    }
}

/// Whether and how to request a diagnostic test.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestPolicy {
    pub should_test: bool,
    /// When the sample is taken.
    pub time_requested: SimTime,
    /// Lab turnaround: the result arrives at `time_requested + latency`.
    pub latency: SimDuration,
}

impl Default for TestPolicy {
    /// Never test.
    fn default() -> Self {
        Self {
            should_test: false,
            time_requested: SimTime::INFINITE_FUTURE,
            latency: SimDuration::INFINITE,
        }
    }
}

/// Which contact reports to send onward.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactTracingPolicy {
    /// Received positive reports are themselves candidates for re-forwarding
    /// to this agent's own contacts in a later round.  The policy decides
    /// propagation when notifications are folded back in; the agent applies
    /// no recursive logic of its own.
    pub report_recursively: bool,
    /// Send the agent's own positive test result to every known contact.
    pub send_positive_test: bool,
}

// ── RiskScore ─────────────────────────────────────────────────────────────────

/// Pluggable per-agent risk policy.  One instance per agent, owned by the
/// agent for its whole lifetime.
///
/// The `add_*` sinks accumulate what the agent observes; the getters answer
/// policy queries from that accumulated belief.  Implementations decide for
/// themselves how to reconcile repeated submissions (e.g. the same test
/// result re-submitted every timestep) — the agent does not deduplicate.
pub trait RiskScore: Send {
    /// Observe a health-state transition being applied to the owning agent.
    fn add_health_state_transition(&mut self, transition: HealthTransition);

    /// Observe the exposures delivered to the owning agent this timestep.
    fn add_exposures(&mut self, exposures: &[&Exposure]);

    /// Observe a counterpart's test result arriving via contact report,
    /// together with the stored contact it refers to.
    fn add_exposure_notification(&mut self, contact: &Contact, result: &TestResult);

    /// Observe one of the owning agent's own test results.
    fn add_test_result(&mut self, result: &TestResult);

    /// How the owning agent should scale visits to `location_uuid`.
    fn visit_adjustment(&self, timestep: &Timestep, location_uuid: LocationUuid)
        -> VisitAdjustment;

    /// Whether to request a diagnostic test this timestep.
    fn test_policy(&self, timestep: &Timestep) -> TestPolicy;

    /// Which contact reports to send onward.
    fn contact_tracing_policy(&self) -> ContactTracingPolicy;

    /// How long contacts stay relevant to this policy.
    ///
    /// Contact pruning against this horizon is deliberately not performed by
    /// the agent yet; the query exists so policies can already express the
    /// horizon.
    fn contact_retention_duration(&self) -> SimDuration;
}

// ── RiskScoreGenerator ────────────────────────────────────────────────────────

/// Factory sampling one `RiskScore` per agent at population-setup time.
pub trait RiskScoreGenerator: Send {
    /// Policy for the next agent.
    fn next_risk_score(&mut self) -> Box<dyn RiskScore>;
}
