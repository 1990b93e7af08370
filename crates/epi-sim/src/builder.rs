//! Fluent builder for constructing a [`Simulation`].

use epi_agent::SeirAgent;
use epi_core::{SimConfig, SimDuration};
use rustc_hash::FxHashMap;

use crate::{SimError, SimResult, Simulation};

/// Fluent builder for [`Simulation`].
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = Simulation::builder(config)
///     .agents(population)
///     .build()?;
/// ```
pub struct SimulationBuilder {
    config: SimConfig,
    agents: Vec<SeirAgent>,
}

impl SimulationBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, agents: Vec::new() }
    }

    /// Add one agent to the population.
    pub fn agent(mut self, agent: SeirAgent) -> Self {
        self.agents.push(agent);
        self
    }

    /// Add a batch of agents to the population.
    pub fn agents(mut self, agents: impl IntoIterator<Item = SeirAgent>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Validate the configuration and population and return a ready-to-run
    /// [`Simulation`].
    pub fn build(self) -> SimResult<Simulation> {
        if self.config.timestep_duration <= SimDuration::ZERO {
            return Err(SimError::Config(format!(
                "timestep duration must be positive, got {}",
                self.config.timestep_duration
            )));
        }
        if self.config.num_timesteps == 0 {
            return Err(SimError::Config("num_timesteps must be at least 1".into()));
        }

        let mut index = FxHashMap::default();
        index.reserve(self.agents.len());
        for (i, agent) in self.agents.iter().enumerate() {
            if index.insert(agent.uuid(), i).is_some() {
                return Err(SimError::DuplicateAgent(agent.uuid()));
            }
        }

        Ok(Simulation::from_parts(self.config, self.agents, index))
    }
}
