//! The inert default risk score.

use epi_core::{
    Contact, Exposure, HealthTransition, LocationUuid, SimDuration, TestResult, Timestep,
};

use crate::{ContactTracingPolicy, RiskScore, TestPolicy, VisitAdjustment};

/// A [`RiskScore`] that learns nothing and changes nothing: visits are
/// unadjusted, tests are never requested, contact tracing is off.
///
/// Useful for passive populations and as the baseline in tests.
#[derive(Default)]
pub struct NullRiskScore;

impl RiskScore for NullRiskScore {
    fn add_health_state_transition(&mut self, _transition: HealthTransition) {}

    fn add_exposures(&mut self, _exposures: &[&Exposure]) {}

    fn add_exposure_notification(&mut self, _contact: &Contact, _result: &TestResult) {}

    fn add_test_result(&mut self, _result: &TestResult) {}

    fn visit_adjustment(
        &self,
        _timestep: &Timestep,
        _location_uuid: LocationUuid,
    ) -> VisitAdjustment {
        VisitAdjustment::default()
    }

    fn test_policy(&self, _timestep: &Timestep) -> TestPolicy {
        TestPolicy::default()
    }

    fn contact_tracing_policy(&self) -> ContactTracingPolicy {
        ContactTracingPolicy::default()
    }

    fn contact_retention_duration(&self) -> SimDuration {
        SimDuration::ZERO
    }
}
