//! Uniform-duration visits over a fixed location list.

use epi_core::{AgentRng, LocationUuid, Timestep, Visit};
use epi_risk::RiskScore;

use crate::duration::{DurationSpecifiedVisitGenerator, LocationDuration};
use crate::VisitGenerator;

const EPSILON: f32 = 1e-5;

/// Visits each listed location once per timestep for a uniformly random
/// share of the window.
///
/// A convenience wrapper over [`DurationSpecifiedVisitGenerator`] with
/// `U(ε, adjustment − ε)` duration samplers, so every location gets a
/// strictly positive draw unless the risk score suppresses it.
pub struct IndexedLocationVisitGenerator {
    inner: DurationSpecifiedVisitGenerator,
}

impl IndexedLocationVisitGenerator {
    pub fn new(location_uuids: impl IntoIterator<Item = LocationUuid>) -> Self {
        let location_durations = location_uuids
            .into_iter()
            .map(|location_uuid| LocationDuration {
                location_uuid,
                sample_duration: Box::new(|adjustment: f32, rng: &mut AgentRng| {
                    if adjustment <= 2.0 * EPSILON {
                        return 0.0;
                    }
                    rng.gen_range(EPSILON..adjustment - EPSILON)
                }),
            })
            .collect();
        Self { inner: DurationSpecifiedVisitGenerator::new(location_durations) }
    }
}

impl VisitGenerator for IndexedLocationVisitGenerator {
    fn generate_visits(
        &self,
        timestep: &Timestep,
        risk_score: &dyn RiskScore,
        rng: &mut AgentRng,
    ) -> Vec<Visit> {
        self.inner.generate_visits(timestep, risk_score, rng)
    }
}
