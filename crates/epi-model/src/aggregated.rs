//! Aggregated exposure transmission: exponential link over summed log hazards.

use epi_core::{AgentRng, EpiError, EpiResult, Exposure, HealthState, HealthTransition, SimTime};

use crate::TransmissionModel;

/// Models transmission between hosts as an exponential of the sum of logs of
/// per-exposure escape probabilities:
///
/// ```text
/// p(infection) = 1 − exp( Σ_j ln(1 − β · infectivity_j) )
/// ```
///
/// where `β` is the configured transmissibility.  Exposures with zero
/// infectivity contribute nothing.  On infection the returned transition is
/// `Exposed` at the *earliest* contributing exposure's start time — the
/// source of truth for "when did exposure begin".
pub struct AggregatedTransmissionModel {
    transmissibility: f32,
}

impl AggregatedTransmissionModel {
    /// `transmissibility` must lie in [0, 1].
    pub fn new(transmissibility: f32) -> EpiResult<Self> {
        if !(0.0..=1.0).contains(&transmissibility) {
            return Err(EpiError::InvalidParameter(format!(
                "transmissibility {transmissibility} outside [0, 1]"
            )));
        }
        Ok(Self { transmissibility })
    }
}

impl TransmissionModel for AggregatedTransmissionModel {
    fn infection_outcome(
        &self,
        exposures: &[&Exposure],
        rng: &mut AgentRng,
    ) -> HealthTransition {
        let mut earliest = SimTime::INFINITE_FUTURE;
        let mut log_escape = 0.0_f64;
        for exposure in exposures {
            if exposure.infectivity <= 0.0 {
                continue;
            }
            earliest = earliest.min(exposure.start_time);
            let hazard = f64::from(self.transmissibility * exposure.infectivity).clamp(0.0, 1.0);
            // ln(0) = -inf makes the escape probability collapse to zero,
            // which is exactly the hazard == 1 limit.
            log_escape += (1.0 - hazard).ln();
        }
        if earliest == SimTime::INFINITE_FUTURE {
            // Nothing infectious in the batch.
            return HealthTransition::UNSCHEDULED;
        }

        let p_infection = 1.0 - log_escape.exp();
        if rng.gen_bool(p_infection) {
            HealthTransition::new(earliest, HealthState::Exposed)
        } else {
            HealthTransition::UNSCHEDULED
        }
    }
}
