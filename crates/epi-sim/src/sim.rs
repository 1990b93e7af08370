//! The `Simulation` struct and its timestep loop.

use epi_agent::SeirAgent;
use epi_core::{
    AgentUuid, ContactReport, InfectionOutcome, QueueBroker, SimConfig, Timestep, Visit,
};
use rustc_hash::FxHashMap;

use crate::{HealthCensus, SimError, SimObserver, SimResult};

// ── Step inputs/outputs ───────────────────────────────────────────────────────

/// Everything flowing *into* one timestep: events produced by the previous
/// round, each addressed to exactly one agent.
#[derive(Default)]
pub struct StepInputs {
    /// Exposure events from location processing (or seeded background
    /// infections), delivered in phase ①.
    pub infection_outcomes: Vec<InfectionOutcome>,
    /// Contact-tracing reports emitted last round, delivered in phase ③.
    pub contact_reports: Vec<ContactReport>,
}

/// Everything one timestep produced for the rest of the simulation.
pub struct StepOutputs {
    /// Annotated visits for the whole population, for location processing.
    pub visits: Vec<Visit>,
    /// Contact reports to route back in at the next timestep.
    pub contact_reports: Vec<ContactReport>,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The population driver.
///
/// Owns all agents and the current timestep, and enforces the phase barrier:
/// each of the three per-agent calls completes for every agent before the
/// next phase starts.  Agents are independent within a phase, so with the
/// `parallel` feature each phase fans out across Rayon's thread pool;
/// results are identical either way because every agent draws from its own
/// RNG stream.
///
/// Create via [`Simulation::builder`].
pub struct Simulation {
    config: SimConfig,
    timestep: Timestep,
    steps_run: u64,
    agents: Vec<SeirAgent>,
    /// Routing index: agent uuid → position in `agents`.
    index: FxHashMap<AgentUuid, usize>,
    /// Background infections queued for the next step's phase ①.
    pending_outcomes: Vec<InfectionOutcome>,
}

impl Simulation {
    pub fn builder(config: SimConfig) -> crate::SimulationBuilder {
        crate::SimulationBuilder::new(config)
    }

    pub(crate) fn from_parts(
        config: SimConfig,
        agents: Vec<SeirAgent>,
        index: FxHashMap<AgentUuid, usize>,
    ) -> Self {
        Self {
            timestep: config.first_timestep(),
            config,
            steps_run: 0,
            agents,
            index,
            pending_outcomes: Vec::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// The window the *next* step will simulate.
    #[inline]
    pub fn timestep(&self) -> &Timestep {
        &self.timestep
    }

    pub fn agent(&self, uuid: AgentUuid) -> Option<&SeirAgent> {
        self.index.get(&uuid).map(|&i| &self.agents[i])
    }

    pub fn agents(&self) -> &[SeirAgent] {
        &self.agents
    }

    /// Population counts by current health state.
    pub fn census(&self) -> HealthCensus {
        let mut census = HealthCensus::default();
        for agent in &self.agents {
            census.count(agent.current_health_transition().health_state);
        }
        census
    }

    /// Queue background infection events for delivery in the next step's
    /// phase ①.  This is how a run gets its index cases.
    pub fn seed_infections(&mut self, outcomes: impl IntoIterator<Item = InfectionOutcome>) {
        self.pending_outcomes.extend(outcomes);
    }

    /// Run the remaining configured timesteps, feeding each step's contact
    /// reports back in at the next step.
    ///
    /// Visits are discarded here: wiring a location collaborator in means
    /// calling [`step`][Self::step] directly and closing the loop yourself.
    pub fn run(&mut self, observer: &mut dyn SimObserver) -> SimResult<()> {
        let mut carried_reports = Vec::new();
        while self.steps_run < self.config.num_timesteps {
            let timestep = self.timestep;
            observer.on_timestep_start(&timestep);

            let infection_outcomes = std::mem::take(&mut self.pending_outcomes);
            let outputs = self.step(StepInputs {
                infection_outcomes,
                contact_reports: carried_reports,
            })?;
            carried_reports = outputs.contact_reports;

            observer.on_timestep_end(&timestep, &self.census());
        }
        observer.on_sim_end(&self.census());
        Ok(())
    }

    /// Run one timestep: route the inputs, drive the three phases across
    /// the whole population, and advance the clock.
    pub fn step(&mut self, inputs: StepInputs) -> SimResult<StepOutputs> {
        let timestep = self.timestep;

        // Route events to their addressees up front so the phases only read
        // per-agent slices.  A miss is a driver wiring bug upstream of the
        // agents' own assertion.
        let mut outcomes_by_agent: Vec<Vec<InfectionOutcome>> =
            vec![Vec::new(); self.agents.len()];
        for outcome in inputs.infection_outcomes {
            let i = self.route(outcome.agent_uuid)?;
            outcomes_by_agent[i].push(outcome);
        }
        let mut reports_by_agent: Vec<Vec<ContactReport>> = vec![Vec::new(); self.agents.len()];
        for report in inputs.contact_reports {
            let i = self.route(report.to_agent_uuid)?;
            reports_by_agent[i].push(report);
        }

        // ── Phase ①: infection outcomes ───────────────────────────────────
        #[cfg(not(feature = "parallel"))]
        {
            for (agent, outcomes) in self.agents.iter_mut().zip(&outcomes_by_agent) {
                agent.process_infection_outcomes(&timestep, outcomes);
            }
        }
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.agents
                .par_iter_mut()
                .zip(outcomes_by_agent.par_iter())
                .for_each(|(agent, outcomes)| {
                    agent.process_infection_outcomes(&timestep, outcomes);
                });
        }

        // ── Phase ②: visits ───────────────────────────────────────────────
        let visit_broker: QueueBroker<Visit> = QueueBroker::new();
        #[cfg(not(feature = "parallel"))]
        {
            for agent in &mut self.agents {
                agent.compute_visits(&timestep, &visit_broker);
            }
        }
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.agents.par_iter_mut().for_each(|agent| {
                agent.compute_visits(&timestep, &visit_broker);
            });
        }

        // ── Phase ③: tests and contact reports ────────────────────────────
        let report_broker: QueueBroker<ContactReport> = QueueBroker::new();
        #[cfg(not(feature = "parallel"))]
        {
            for (agent, reports) in self.agents.iter_mut().zip(&reports_by_agent) {
                agent.update_contact_reports(&timestep, reports, &report_broker);
            }
        }
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.agents
                .par_iter_mut()
                .zip(reports_by_agent.par_iter())
                .for_each(|(agent, reports)| {
                    agent.update_contact_reports(&timestep, reports, &report_broker);
                });
        }

        self.timestep.advance();
        self.steps_run += 1;

        Ok(StepOutputs {
            visits: visit_broker.drain(),
            contact_reports: report_broker.drain(),
        })
    }

    fn route(&self, uuid: AgentUuid) -> SimResult<usize> {
        self.index.get(&uuid).copied().ok_or(SimError::UnknownAgent(uuid))
    }
}
