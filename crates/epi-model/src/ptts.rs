//! Probabilistic timed transition system (PTTS) over health states.
//!
//! # Model
//!
//! A continuous-time Markov chain on `HealthState`: each state carries a set
//! of weighted outgoing edges, and each edge carries a gamma distribution
//! over the dwell time (in days) spent in the source state before the edge
//! fires.  One call to `next_health_transition` samples an edge by weight and
//! a dwell time from that edge's distribution.
//!
//! States with no outgoing edges are terminal: the model returns the same
//! state at `SimTime::INFINITE_FUTURE` and the agent's chain stops.

use epi_core::{AgentRng, EpiError, EpiResult, HealthState, HealthTransition, SimDuration};
use rand::distributions::Distribution;
use rand_distr::Gamma;

// ── Edges ─────────────────────────────────────────────────────────────────────

struct Edge {
    src: HealthState,
    dst: HealthState,
    weight: f32,
    /// Dwell time in the source state, in days.
    dwell_days: Gamma<f32>,
}

// ── PttsTransitionModel ───────────────────────────────────────────────────────

/// A [`TransitionModel`][crate::TransitionModel] driven by a weighted edge
/// list with gamma-distributed dwell times.
pub struct PttsTransitionModel {
    edges: Vec<Edge>,
}

impl PttsTransitionModel {
    pub fn builder() -> PttsTransitionModelBuilder {
        PttsTransitionModelBuilder { edges: Vec::new() }
    }

    /// A canonical SEIR parameterization: Exposed → Infectious after a mean
    /// 2-day incubation, Infectious → Recovered after a mean 6-day course.
    /// Recovered is terminal.
    pub fn seir_default() -> Self {
        Self::builder()
            .edge(HealthState::Exposed, HealthState::Infectious, 1.0, 4.0, 0.5)
            .edge(HealthState::Infectious, HealthState::Recovered, 1.0, 4.0, 1.5)
            .build()
            .expect("default SEIR parameters are valid")
    }
}

impl crate::TransitionModel for PttsTransitionModel {
    fn next_health_transition(
        &self,
        latest: &HealthTransition,
        rng: &mut AgentRng,
    ) -> HealthTransition {
        let outgoing: Vec<&Edge> = self
            .edges
            .iter()
            .filter(|e| e.src == latest.health_state)
            .collect();
        let total_weight: f32 = outgoing.iter().map(|e| e.weight).sum();
        if outgoing.is_empty() || total_weight <= 0.0 {
            // Terminal state: chain stops here.
            return HealthTransition::new(epi_core::SimTime::INFINITE_FUTURE, latest.health_state);
        }

        // Weighted edge choice by cumulative scan.
        let mut draw = rng.gen_range(0.0..total_weight);
        let mut chosen = outgoing[outgoing.len() - 1];
        for edge in &outgoing {
            if draw < edge.weight {
                chosen = edge;
                break;
            }
            draw -= edge.weight;
        }

        let dwell_days = chosen.dwell_days.sample(rng.inner());
        let dwell = SimDuration::days(1).mul_f32(dwell_days.max(0.0));
        HealthTransition::new(latest.time + dwell, chosen.dst)
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

struct EdgeSpec {
    src: HealthState,
    dst: HealthState,
    weight: f32,
    shape: f32,
    scale: f32,
}

/// Validating builder for [`PttsTransitionModel`].
pub struct PttsTransitionModelBuilder {
    edges: Vec<EdgeSpec>,
}

impl PttsTransitionModelBuilder {
    /// Add an edge `src → dst` with selection `weight` and a
    /// `Gamma(shape, scale)` dwell-time distribution in days
    /// (mean dwell = `shape * scale` days).
    pub fn edge(
        mut self,
        src: HealthState,
        dst: HealthState,
        weight: f32,
        shape: f32,
        scale: f32,
    ) -> Self {
        self.edges.push(EdgeSpec { src, dst, weight, shape, scale });
        self
    }

    /// Validate all edges and construct the model.
    pub fn build(self) -> EpiResult<PttsTransitionModel> {
        let mut edges = Vec::with_capacity(self.edges.len());
        for spec in self.edges {
            if spec.weight < 0.0 {
                return Err(EpiError::InvalidParameter(format!(
                    "negative weight {} on edge {} -> {}",
                    spec.weight, spec.src, spec.dst
                )));
            }
            let dwell_days = Gamma::new(spec.shape, spec.scale).map_err(|e| {
                EpiError::InvalidParameter(format!(
                    "gamma({}, {}) on edge {} -> {}: {e}",
                    spec.shape, spec.scale, spec.src, spec.dst
                ))
            })?;
            edges.push(Edge { src: spec.src, dst: spec.dst, weight: spec.weight, dwell_days });
        }
        Ok(PttsTransitionModel { edges })
    }
}
