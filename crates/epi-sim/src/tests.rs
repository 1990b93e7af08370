//! Unit tests for the timestep driver.

#[cfg(test)]
mod fixtures {
    use std::sync::Arc;

    use epi_agent::SeirAgent;
    use epi_core::{
        AgentUuid, Contact, Exposure, ExposureType, HealthState, HealthTransition,
        InfectionOutcome, LocationUuid, SimConfig, SimDuration, SimTime, TestResult, Timestep,
    };
    use epi_model::{AggregatedTransmissionModel, PttsTransitionModel, TransmissionModel};
    use epi_risk::{ContactTracingPolicy, NullRiskScore, RiskScore, TestPolicy, VisitAdjustment};
    use epi_visit::IndexedLocationVisitGenerator;

    pub fn config(num_timesteps: u64) -> SimConfig {
        SimConfig {
            start_time: SimTime::EPOCH,
            timestep_duration: SimDuration::days(1),
            num_timesteps,
            seed: 42,
        }
    }

    pub fn certain_transmission() -> Arc<dyn TransmissionModel> {
        Arc::new(AggregatedTransmissionModel::new(1.0).unwrap())
    }

    /// A susceptible agent with the default SEIR chain and two locations,
    /// its RNG stream derived from the config's master seed.
    pub fn passive_agent(config: &SimConfig, uuid: i64) -> SeirAgent {
        let uuid = AgentUuid(uuid);
        SeirAgent::susceptible(
            uuid,
            config.agent_rng(uuid),
            certain_transmission(),
            Box::new(PttsTransitionModel::seir_default()),
            Box::new(IndexedLocationVisitGenerator::new([
                LocationUuid(1),
                LocationUuid(2),
            ])),
            Box::new(NullRiskScore),
        )
    }

    /// An agent seeded infectious forever (no outgoing transitions).
    pub fn infectious_agent(
        config: &SimConfig,
        uuid: i64,
        risk_score: Box<dyn RiskScore>,
    ) -> SeirAgent {
        let uuid = AgentUuid(uuid);
        SeirAgent::new(
            uuid,
            HealthTransition::new(SimTime::from_seconds(-1), HealthState::Infectious),
            config.agent_rng(uuid),
            certain_transmission(),
            Box::new(PttsTransitionModel::builder().build().unwrap()),
            Box::new(IndexedLocationVisitGenerator::new([LocationUuid(1)])),
            risk_score,
        )
    }

    pub fn background_infection(agent: i64) -> InfectionOutcome {
        InfectionOutcome {
            agent_uuid: AgentUuid(agent),
            exposure: Exposure {
                start_time: SimTime::EPOCH,
                duration: SimDuration::hours(1),
                infectivity: 1.0,
                micro_exposures: None,
            },
            exposure_type: ExposureType::Background,
            source_uuid: AgentUuid::INVALID,
        }
    }

    pub fn contact_infection(agent: i64, source: i64) -> InfectionOutcome {
        InfectionOutcome {
            agent_uuid: AgentUuid(agent),
            exposure: Exposure {
                start_time: SimTime::EPOCH,
                duration: SimDuration::hours(1),
                infectivity: 1.0,
                micro_exposures: None,
            },
            exposure_type: ExposureType::Contact,
            source_uuid: AgentUuid(source),
        }
    }

    /// Tests every round at the window start, traces positives.
    pub struct TracingScore;

    impl RiskScore for TracingScore {
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

        fn test_policy(&self, timestep: &Timestep) -> TestPolicy {
            TestPolicy {
                should_test: true,
                time_requested: timestep.start_time(),
                latency: SimDuration::hours(1),
            }
        }

        fn contact_tracing_policy(&self) -> ContactTracingPolicy {
            ContactTracingPolicy { report_recursively: false, send_positive_test: true }
        }

        fn contact_retention_duration(&self) -> SimDuration {
            SimDuration::INFINITE
        }
    }
}

#[cfg(test)]
mod builder {
    use epi_core::{SimConfig, SimDuration, SimTime};

    use super::fixtures::*;
    use crate::{SimError, Simulation};

    #[test]
    fn rejects_duplicate_agent() {
        let config = config(1);
        let result = Simulation::builder(config.clone())
            .agent(passive_agent(&config, 7))
            .agent(passive_agent(&config, 7))
            .build();
        assert!(matches!(result, Err(SimError::DuplicateAgent(uuid)) if uuid.0 == 7));
    }

    #[test]
    fn rejects_zero_timesteps() {
        let config = config(0);
        let result =
            Simulation::builder(config.clone()).agent(passive_agent(&config, 1)).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn rejects_nonpositive_timestep_duration() {
        let bad = SimConfig {
            start_time: SimTime::EPOCH,
            timestep_duration: SimDuration::ZERO,
            num_timesteps: 1,
            seed: 42,
        };
        let result = Simulation::builder(bad).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn builds_with_first_timestep_from_config() {
        let config = config(3);
        let sim =
            Simulation::builder(config.clone()).agent(passive_agent(&config, 1)).build().unwrap();
        assert_eq!(sim.timestep().start_time(), SimTime::EPOCH);
        assert_eq!(sim.timestep().duration(), SimDuration::days(1));
    }
}

#[cfg(test)]
mod step {
    use epi_core::{AgentUuid, HealthState, SimTime};

    use super::fixtures::*;
    use crate::{SimError, Simulation, StepInputs};

    #[test]
    fn routes_infection_outcomes_to_addressee() {
        let config = config(5);
        let mut sim = Simulation::builder(config.clone())
            .agent(passive_agent(&config, 1))
            .agent(passive_agent(&config, 2))
            .build()
            .unwrap();

        sim.step(StepInputs {
            infection_outcomes: vec![background_infection(2)],
            contact_reports: Vec::new(),
        })
        .unwrap();

        // Unit infectivity against unit transmissibility is a certain hit.
        assert_eq!(
            sim.agent(AgentUuid(1)).unwrap().current_health_transition().health_state,
            HealthState::Susceptible
        );
        assert!(sim.agent(AgentUuid(2)).unwrap().initial_infection_time().is_some());
        assert_eq!(sim.census().total(), 2);
        assert_eq!(sim.census().susceptible, 1);
    }

    #[test]
    fn rejects_event_for_unknown_agent() {
        let config = config(1);
        let mut sim =
            Simulation::builder(config.clone()).agent(passive_agent(&config, 1)).build().unwrap();
        let result = sim.step(StepInputs {
            infection_outcomes: vec![background_infection(99)],
            contact_reports: Vec::new(),
        });
        assert!(matches!(result, Err(SimError::UnknownAgent(uuid)) if uuid.0 == 99));
    }

    #[test]
    fn publishes_a_visit_partition_per_agent() {
        let config = config(1);
        let mut sim = Simulation::builder(config.clone())
            .agent(passive_agent(&config, 1))
            .agent(passive_agent(&config, 2))
            .build()
            .unwrap();
        let window = *sim.timestep();

        let outputs = sim.step(StepInputs::default()).unwrap();

        for uuid in [AgentUuid(1), AgentUuid(2)] {
            let visits: Vec<_> =
                outputs.visits.iter().filter(|v| v.agent_uuid == uuid).collect();
            assert!(!visits.is_empty());
            assert_eq!(visits.first().unwrap().start_time, window.start_time());
            assert_eq!(visits.last().unwrap().end_time, window.end_time());
            for pair in visits.windows(2) {
                assert_eq!(pair[0].end_time, pair[1].start_time);
            }
            for visit in &visits {
                assert_eq!(visit.health_state, HealthState::Susceptible);
            }
        }
    }

    #[test]
    fn advances_the_clock() {
        let config = config(2);
        let mut sim =
            Simulation::builder(config.clone()).agent(passive_agent(&config, 1)).build().unwrap();
        sim.step(StepInputs::default()).unwrap();
        assert_eq!(sim.timestep().start_time(), SimTime::from_seconds(86_400));
    }

    #[test]
    fn contact_reports_round_trip_to_the_next_step() {
        let config = config(3);
        let mut sim = Simulation::builder(config.clone())
            .agent(infectious_agent(&config, 1, Box::new(TracingScore)))
            .agent(passive_agent(&config, 2))
            .build()
            .unwrap();

        // Agent 1 learns of contact with agent 2, tests positive, reports.
        let outputs = sim
            .step(StepInputs {
                infection_outcomes: vec![contact_infection(1, 2)],
                contact_reports: Vec::new(),
            })
            .unwrap();

        assert_eq!(outputs.contact_reports.len(), 1);
        let report = &outputs.contact_reports[0];
        assert_eq!(report.from_agent_uuid, AgentUuid(1));
        assert_eq!(report.to_agent_uuid, AgentUuid(2));
        assert!(report.test_result.is_positive());

        // The report routes cleanly back in at the following step.
        sim.step(StepInputs {
            infection_outcomes: Vec::new(),
            contact_reports: outputs.contact_reports,
        })
        .unwrap();
    }
}

#[cfg(test)]
mod run {
    use epi_core::{SimTime, Timestep};

    use super::fixtures::*;
    use crate::{HealthCensus, SimObserver, Simulation};

    #[derive(Default)]
    struct RecordingObserver {
        starts: Vec<SimTime>,
        end_censuses: Vec<HealthCensus>,
        ended: bool,
    }

    impl SimObserver for RecordingObserver {
        fn on_timestep_start(&mut self, timestep: &Timestep) {
            self.starts.push(timestep.start_time());
        }

        fn on_timestep_end(&mut self, _timestep: &Timestep, census: &HealthCensus) {
            self.end_censuses.push(*census);
        }

        fn on_sim_end(&mut self, _census: &HealthCensus) {
            self.ended = true;
        }
    }

    #[test]
    fn runs_the_configured_number_of_timesteps() {
        let config = config(4);
        let mut sim = Simulation::builder(config.clone())
            .agents((1..=3).map(|i| passive_agent(&config, i)))
            .build()
            .unwrap();
        let mut observer = RecordingObserver::default();

        sim.run(&mut observer).unwrap();

        assert_eq!(
            observer.starts,
            vec![
                SimTime::from_seconds(0),
                SimTime::from_seconds(86_400),
                SimTime::from_seconds(172_800),
                SimTime::from_seconds(259_200),
            ]
        );
        assert!(observer.ended);
        for census in &observer.end_censuses {
            assert_eq!(census.total(), 3);
        }
    }

    #[test]
    fn seeded_infection_leaves_susceptibility() {
        let config = config(30);
        let mut sim = Simulation::builder(config.clone())
            .agents((1..=4).map(|i| passive_agent(&config, i)))
            .build()
            .unwrap();
        sim.seed_infections([background_infection(1)]);
        let mut observer = RecordingObserver::default();

        sim.run(&mut observer).unwrap();

        let census = sim.census();
        assert_eq!(census.total(), 4);
        // The index case left susceptible and either still carries the
        // pathogen or has recovered; nobody else was exposed (no location
        // collaborator is wired into `run`).
        assert_eq!(census.susceptible, 3);
        assert_eq!(census.infected() + census.recovered, 1);
    }

    #[test]
    fn master_seed_determines_the_whole_run() {
        let run = || {
            let config = config(10);
            let mut sim = Simulation::builder(config.clone())
                .agents((1..=3).map(|i| passive_agent(&config, i)))
                .build()
                .unwrap();
            sim.seed_infections([background_infection(1)]);
            let mut observer = RecordingObserver::default();
            sim.run(&mut observer).unwrap();
            observer.end_censuses
        };
        // Every agent RNG derives from config.seed, so two identically
        // configured runs trace identical epidemics.
        assert_eq!(run(), run());
    }
}
