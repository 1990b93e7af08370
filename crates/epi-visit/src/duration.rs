//! Visit generation from per-location duration samplers.

use epi_core::{AgentRng, LocationUuid, Timestep, Visit};
use epi_risk::RiskScore;

use crate::VisitGenerator;

/// One entry in an agent's visiting plan: a location plus a sampler for how
/// long a visit there lasts, in arbitrary relative units.
///
/// The sampler's `adjustment` argument is a value in [0, 1] that should
/// linearly scale the mean of the sample; it comes from the risk score's
/// [`VisitAdjustment::duration_adjustment`][epi_risk::VisitAdjustment].
/// Locations may repeat.
pub struct LocationDuration {
    pub location_uuid: LocationUuid,
    pub sample_duration: Box<dyn Fn(f32, &mut AgentRng) -> f32 + Send + Sync>,
}

/// Visits every planned location once per timestep, in plan order, with
/// sampled relative durations normalized so the visits exactly partition the
/// timestep.
///
/// The risk score gates each location twice: a Bernoulli draw on the
/// frequency adjustment decides whether the visit happens at all, and the
/// duration adjustment scales how long it lasts relative to the others.
/// Zero-duration entries are dropped from the output.
pub struct DurationSpecifiedVisitGenerator {
    location_durations: Vec<LocationDuration>,
}

impl DurationSpecifiedVisitGenerator {
    pub fn new(location_durations: Vec<LocationDuration>) -> Self {
        Self { location_durations }
    }
}

impl VisitGenerator for DurationSpecifiedVisitGenerator {
    fn generate_visits(
        &self,
        timestep: &Timestep,
        risk_score: &dyn RiskScore,
        rng: &mut AgentRng,
    ) -> Vec<Visit> {
        if self.location_durations.is_empty() {
            return Vec::new();
        }

        let mut durations: Vec<f32> = Vec::with_capacity(self.location_durations.len());
        for location_duration in &self.location_durations {
            let adjustment =
                risk_score.visit_adjustment(timestep, location_duration.location_uuid);
            if !rng.gen_bool(f64::from(adjustment.frequency_adjustment)) {
                durations.push(0.0);
            } else {
                let sample =
                    (location_duration.sample_duration)(adjustment.duration_adjustment, rng);
                durations.push(sample.max(0.0));
            }
        }

        let mut normalizer: f32 = durations.iter().sum();
        if normalizer == 0.0 {
            // Agents have to be somewhere.  If no location got any duration,
            // send them to their first location all day.
            normalizer = 1.0;
            durations[0] = 1.0;
        }

        let last = self.location_durations.len() - 1;
        let mut visits = Vec::new();
        let mut start_time = timestep.start_time();
        for (i, location_duration) in self.location_durations.iter().enumerate() {
            // The last interval absorbs all rounding remainder so that the
            // partition always ends exactly at the window's end.
            let end_time = if i == last {
                timestep.end_time()
            } else {
                let span = timestep.duration().mul_f32(durations[i] / normalizer);
                (start_time + span).min(timestep.end_time())
            };
            if end_time <= start_time {
                continue;
            }
            visits.push(Visit::unassigned(
                location_duration.location_uuid,
                start_time,
                end_time,
            ));
            start_time = end_time;
        }
        visits
    }
}
