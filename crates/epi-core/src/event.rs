//! Cross-agent event and message schemas.
//!
//! Everything here is a plain value: agents never reference each other
//! directly, all communication travels by value through a
//! [`Broker`][crate::Broker].  The flow per timestep is:
//!
//! ```text
//! agent ── Visit ──▶ location processing ── Contact/InfectionOutcome ──▶ agent
//! agent ── ContactReport ──▶ counterpart agent
//! ```
//!
//! Location-side processing (who actually met whom) is outside this
//! workspace; only the schemas are defined here.

use crate::{AgentUuid, HealthState, LocationUuid, SimDuration, SimTime};

// ── Micro exposures ───────────────────────────────────────────────────────────

/// Number of buckets in a micro-exposure histogram.
pub const MICRO_EXPOSURE_BUCKETS: usize = 5;

/// Deterministically spread the whole minutes of `overlap` evenly across the
/// first `min(buckets, minutes)` buckets.
///
/// A zero-minute overlap yields an all-zero array; a 3-minute overlap fills
/// three buckets with one count each.  Duration is never over-assigned.
pub fn generate_micro_exposures(overlap: SimDuration) -> [u8; MICRO_EXPOSURE_BUCKETS] {
    let mut counts = [0_u8; MICRO_EXPOSURE_BUCKETS];

    let total_minutes = overlap.whole_minutes().max(0) as usize;
    if total_minutes == 0 {
        return counts;
    }

    let buckets_to_fill = MICRO_EXPOSURE_BUCKETS.min(total_minutes);
    let counts_per_bucket = (total_minutes / buckets_to_fill) as u8;
    for bucket in counts.iter_mut().take(buckets_to_fill) {
        *bucket = counts_per_bucket;
    }
    counts
}

// ── Exposure ──────────────────────────────────────────────────────────────────

/// One contact-derived exposure dose.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exposure {
    pub start_time: SimTime,
    pub duration: SimDuration,
    /// Infectivity of the source over this exposure, in [0, 1].
    pub infectivity: f32,
    /// Optional per-minute proximity histogram (see
    /// [`generate_micro_exposures`]).
    pub micro_exposures: Option<[u8; MICRO_EXPOSURE_BUCKETS]>,
}

impl Default for Exposure {
    fn default() -> Self {
        Self {
            start_time: SimTime::EPOCH,
            duration: SimDuration::ZERO,
            infectivity: 0.0,
            micro_exposures: None,
        }
    }
}

/// How an exposure reached the agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExposureType {
    /// Realized pairwise contact at a shared location.
    Contact,
    /// Driver-seeded background exposure (e.g. an imported initial infection).
    Background,
}

// ── InfectionOutcome ──────────────────────────────────────────────────────────

/// An inbound exposure event addressed to exactly one agent.
///
/// The addressee must reject (fatal precondition violation) any outcome whose
/// `agent_uuid` does not match its own.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfectionOutcome {
    pub agent_uuid: AgentUuid,
    pub exposure: Exposure,
    pub exposure_type: ExposureType,
    pub source_uuid: AgentUuid,
}

// ── Contact ───────────────────────────────────────────────────────────────────

/// A realized pairwise contact, as remembered by one side.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contact {
    pub other_uuid: AgentUuid,
    pub exposure: Exposure,
}

// ── TestResult ────────────────────────────────────────────────────────────────

/// Outcome of one diagnostic test.
///
/// `probability` is the test's positivity signal — 0 or 1 in the current
/// policies, but modeled as a float to allow imprecise tests.  "Retry"
/// semantics are a data field interpreted by the risk-score policy, not by
/// the agent's control flow.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestResult {
    pub time_requested: SimTime,
    pub time_received: SimTime,
    pub needs_retry: bool,
    pub probability: f32,
}

impl TestResult {
    /// The never-tested sentinel an agent starts with.
    pub const PENDING: TestResult = TestResult {
        time_requested: SimTime::INFINITE_FUTURE,
        time_received: SimTime::INFINITE_FUTURE,
        needs_retry: false,
        probability: 0.0,
    };

    /// Policy reading of positivity: any non-zero signal counts.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.probability > 0.0
    }
}

// ── ContactReport ─────────────────────────────────────────────────────────────

/// A contact-tracing message tied to a specific test result, addressed to
/// exactly one counterpart agent.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactReport {
    pub from_agent_uuid: AgentUuid,
    pub to_agent_uuid: AgentUuid,
    pub test_result: TestResult,
}

// ── Visit ─────────────────────────────────────────────────────────────────────

/// Presence at a location during `[start_time, end_time)`, tagged with the
/// health state valid during that interval.
///
/// Visit generators emit visits with `agent_uuid == AgentUuid::INVALID` and a
/// placeholder health state; the owning agent splits them at health-state
/// boundaries and fills in both fields before publishing.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    pub location_uuid: LocationUuid,
    pub agent_uuid: AgentUuid,
    pub start_time: SimTime,
    pub end_time: SimTime,
    pub health_state: HealthState,
}

impl Visit {
    /// An unannotated interval at `location_uuid`, as produced by visit
    /// generators.
    pub fn unassigned(location_uuid: LocationUuid, start_time: SimTime, end_time: SimTime) -> Self {
        Self {
            location_uuid,
            agent_uuid: AgentUuid::INVALID,
            start_time,
            end_time,
            health_state: HealthState::Susceptible,
        }
    }

    #[inline]
    pub fn duration(&self) -> SimDuration {
        self.end_time - self.start_time
    }
}
