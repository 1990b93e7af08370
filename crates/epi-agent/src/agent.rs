//! The SEIR agent state machine.

use std::sync::Arc;

use epi_core::{
    AgentRng, AgentUuid, Broker, Contact, ContactReport, Exposure, ExposureType, HealthState,
    HealthTransition, InfectionOutcome, SimDuration, SimTime, TestResult, Timestep, Visit,
};
use epi_model::{TransitionModel, TransmissionModel};
use epi_risk::RiskScore;
use epi_visit::VisitGenerator;

/// One simulated person.
///
/// The agent owns its transition model, visit generator, risk score and RNG
/// for its whole lifetime, and shares one transmission model with the rest
/// of the population.  All cross-agent communication happens by value
/// through the brokers passed into the per-timestep calls; see the crate
/// docs for the phase contract.
///
/// # Health chain
///
/// `health_transitions` is the full list of transitions applied so far, in
/// nondecreasing time order; its last element is the agent's current state.
/// `next_transition` is the single pending transition, with
/// [`HealthTransition::UNSCHEDULED`] meaning "nothing scheduled" (the
/// permanently susceptible resting state).  Only an agent whose current
/// *and* pending state are both susceptible accepts new infection attempts:
/// the first exposure that moves it out of susceptible wins, later outcomes
/// are ignored until the chain returns to susceptible.
pub struct SeirAgent {
    uuid: AgentUuid,
    rng: AgentRng,
    health_transitions: Vec<HealthTransition>,
    next_transition: HealthTransition,
    /// True onset of the first infected-state transition, kept unadjusted
    /// even when the applied transition time is forward-adjusted for visit
    /// splitting.  Ground truth for diagnostic tests.
    initial_infection_time: Option<SimTime>,
    test_result: TestResult,
    contacts: Vec<Contact>,
    transition_model: Box<dyn TransitionModel>,
    transmission_model: Arc<dyn TransmissionModel>,
    visit_generator: Box<dyn VisitGenerator>,
    risk_score: Box<dyn RiskScore>,
}

impl SeirAgent {
    /// An agent starting in the default susceptible resting state: current
    /// susceptible since forever, nothing scheduled.  The transition model
    /// is not consulted until an infection happens.
    pub fn susceptible(
        uuid: AgentUuid,
        rng: AgentRng,
        transmission_model: Arc<dyn TransmissionModel>,
        transition_model: Box<dyn TransitionModel>,
        visit_generator: Box<dyn VisitGenerator>,
        risk_score: Box<dyn RiskScore>,
    ) -> Self {
        Self::new(
            uuid,
            HealthTransition::new(SimTime::INFINITE_PAST, HealthState::Susceptible),
            rng,
            transmission_model,
            transition_model,
            visit_generator,
            risk_score,
        )
    }

    /// An agent starting from an explicit initial transition.
    ///
    /// A non-susceptible initial state immediately queries the transition
    /// model for the pending follow-up, so mid-incubation agents can be
    /// seeded directly.
    pub fn new(
        uuid: AgentUuid,
        initial_transition: HealthTransition,
        mut rng: AgentRng,
        transmission_model: Arc<dyn TransmissionModel>,
        transition_model: Box<dyn TransitionModel>,
        visit_generator: Box<dyn VisitGenerator>,
        risk_score: Box<dyn RiskScore>,
    ) -> Self {
        let (next_transition, initial_infection_time) =
            if initial_transition.health_state == HealthState::Susceptible {
                (HealthTransition::UNSCHEDULED, None)
            } else {
                let next = transition_model.next_health_transition(&initial_transition, &mut rng);
                let onset = initial_transition
                    .health_state
                    .is_infected()
                    .then_some(initial_transition.time);
                (next, onset)
            };
        Self {
            uuid,
            rng,
            health_transitions: vec![initial_transition],
            next_transition,
            initial_infection_time,
            test_result: TestResult::PENDING,
            contacts: Vec::new(),
            transition_model,
            transmission_model,
            visit_generator,
            risk_score,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn uuid(&self) -> AgentUuid {
        self.uuid
    }

    /// The most recently applied transition.
    pub fn current_health_transition(&self) -> HealthTransition {
        *self
            .health_transitions
            .last()
            .expect("an agent always has at least its initial transition")
    }

    /// The pending transition; [`HealthTransition::UNSCHEDULED`] if none.
    #[inline]
    pub fn next_health_transition(&self) -> HealthTransition {
        self.next_transition
    }

    /// True onset of this agent's infection, if it was ever infected.
    #[inline]
    pub fn initial_infection_time(&self) -> Option<SimTime> {
        self.initial_infection_time
    }

    /// The agent's current (most recent) test result.
    #[inline]
    pub fn test_result(&self) -> TestResult {
        self.test_result
    }

    // ── Phase 1: infection outcomes ───────────────────────────────────────────

    /// Ingest the previous round's exposure events and advance the health
    /// chain through the current timestep.
    ///
    /// An empty `outcomes` slice is the normal steady state and only
    /// advances already-due transitions.
    ///
    /// # Panics
    /// Panics if any outcome is addressed to a different agent; that is a
    /// driver routing bug, not a data condition.
    pub fn process_infection_outcomes(
        &mut self,
        timestep: &Timestep,
        outcomes: &[InfectionOutcome],
    ) {
        if !outcomes.is_empty() {
            for outcome in outcomes {
                assert_eq!(
                    outcome.agent_uuid, self.uuid,
                    "infection outcome routed to the wrong agent"
                );
                self.record_contact(outcome);
            }
            let exposures: Vec<&Exposure> = outcomes.iter().map(|o| &o.exposure).collect();
            self.risk_score.add_exposures(&exposures);

            // First exposure wins: only a fully susceptible agent (nothing
            // applied, nothing pending) resolves new infection attempts.
            // One aggregated model call covers the whole batch.
            if self.current_health_transition().health_state == HealthState::Susceptible
                && self.next_transition.health_state == HealthState::Susceptible
            {
                let outcome = self
                    .transmission_model
                    .infection_outcome(&exposures, &mut self.rng);
                if outcome.health_state != HealthState::Susceptible {
                    self.next_transition = outcome;
                }
            }
        }
        self.advance_health_chain(timestep);
    }

    /// Apply every pending transition falling inside `timestep`, chaining
    /// through the transition model.  A timestep may contain several
    /// transitions when dwell times are short.
    fn advance_health_chain(&mut self, timestep: &Timestep) {
        while self.next_transition.time < timestep.end_time()
            && self.next_transition.health_state != HealthState::Susceptible
        {
            let due = self.next_transition;
            if due.health_state.is_infected() && self.initial_infection_time.is_none() {
                self.initial_infection_time = Some(due.time);
            }

            // A dwell time of zero (or less) would produce a zero-length
            // visit interval, so the applied time is pushed forward to just
            // before the window's end; the true onset stays recorded above.
            let mut applied = due;
            if applied.time <= self.current_health_transition().time {
                applied.time = timestep.end_time() - SimDuration::seconds(1);
            }

            self.health_transitions.push(applied);
            self.risk_score.add_health_state_transition(applied);
            self.next_transition = self
                .transition_model
                .next_health_transition(&applied, &mut self.rng);
        }
    }

    fn record_contact(&mut self, outcome: &InfectionOutcome) {
        if outcome.exposure_type != ExposureType::Contact || !outcome.source_uuid.is_valid() {
            return;
        }
        let contact = Contact { other_uuid: outcome.source_uuid, exposure: outcome.exposure };
        match self.contacts.iter_mut().find(|c| c.other_uuid == contact.other_uuid) {
            Some(existing) => *existing = contact,
            None => self.contacts.push(contact),
        }
    }

    // ── Phase 2: visits ───────────────────────────────────────────────────────

    /// Plan this timestep's visits, split them at every health-state
    /// boundary falling strictly inside an interval, annotate each piece
    /// with the agent's uuid and the state valid during it, and publish the
    /// whole batch in one send.
    ///
    /// Output order is the generator's interval order, with splits
    /// chronological within each interval.  Zero-length pieces are dropped.
    pub fn compute_visits(&mut self, timestep: &Timestep, broker: &dyn Broker<Visit>) {
        let raw = self
            .visit_generator
            .generate_visits(timestep, self.risk_score.as_ref(), &mut self.rng);

        let mut visits = Vec::with_capacity(raw.len());
        for interval in &raw {
            self.split_visit(interval, &mut visits);
        }
        if !visits.is_empty() {
            broker.send(visits);
        }
    }

    fn split_visit(&self, interval: &Visit, out: &mut Vec<Visit>) {
        let mut start = interval.start_time;
        for transition in &self.health_transitions {
            if transition.time <= start {
                continue;
            }
            if transition.time >= interval.end_time {
                break;
            }
            out.push(Visit {
                location_uuid: interval.location_uuid,
                agent_uuid: self.uuid,
                start_time: start,
                end_time: transition.time,
                health_state: self.health_state_at(start),
            });
            start = transition.time;
        }
        if interval.end_time > start {
            out.push(Visit {
                location_uuid: interval.location_uuid,
                agent_uuid: self.uuid,
                start_time: start,
                end_time: interval.end_time,
                health_state: self.health_state_at(start),
            });
        }
    }

    /// State valid at `time`: the last applied transition at or before it,
    /// susceptible before any transition applies.
    fn health_state_at(&self, time: SimTime) -> HealthState {
        self.health_transitions
            .iter()
            .rev()
            .find(|t| t.time <= time)
            .map_or(HealthState::Susceptible, |t| t.health_state)
    }

    // ── Phase 3: tests and contact reports ────────────────────────────────────

    /// Fold inbound contact-tracing reports into the risk score, run a
    /// diagnostic test if the policy asks for one, and notify known contacts
    /// of a positive result when the tracing policy says to.
    ///
    /// Nothing is ever sent when there is nothing to report: no contacts, a
    /// negative result, or tracing switched off all produce zero batches.
    ///
    /// # Panics
    /// Panics if any report is addressed to a different agent.
    pub fn update_contact_reports(
        &mut self,
        timestep: &Timestep,
        reports: &[ContactReport],
        broker: &dyn Broker<ContactReport>,
    ) {
        for report in reports {
            assert_eq!(
                report.to_agent_uuid, self.uuid,
                "contact report routed to the wrong agent"
            );
            // The policy, not the agent, decides what a notification means
            // (including recursive propagation), so it gets the stored
            // contact context alongside the counterpart's result.
            let contact = self
                .contacts
                .iter()
                .find(|c| c.other_uuid == report.from_agent_uuid)
                .cloned()
                .unwrap_or(Contact {
                    other_uuid: report.from_agent_uuid,
                    exposure: Exposure::default(),
                });
            self.risk_score.add_exposure_notification(&contact, &report.test_result);
        }

        // The current result is re-submitted every round; reconciling
        // repeats is the policy's job.
        self.risk_score.add_test_result(&self.test_result);
        let test_policy = self.risk_score.test_policy(timestep);
        if test_policy.should_test {
            let result = TestResult {
                time_requested: test_policy.time_requested,
                time_received: test_policy.time_requested + test_policy.latency,
                needs_retry: false,
                probability: if self.infected_at(test_policy.time_requested) { 1.0 } else { 0.0 },
            };
            self.test_result = result;
            self.risk_score.add_test_result(&result);
        }

        let tracing_policy = self.risk_score.contact_tracing_policy();
        if tracing_policy.send_positive_test
            && self.test_result.is_positive()
            && !self.contacts.is_empty()
        {
            let reports: Vec<ContactReport> = self
                .contacts
                .iter()
                .map(|contact| ContactReport {
                    from_agent_uuid: self.uuid,
                    to_agent_uuid: contact.other_uuid,
                    test_result: self.test_result,
                })
                .collect();
            broker.send(reports);
        }
    }

    /// Infection ground truth for a simulated diagnostic sample taken at
    /// `time`, judged from the true onset rather than any forward-adjusted
    /// applied time.
    fn infected_at(&self, time: SimTime) -> bool {
        match self.initial_infection_time {
            Some(onset) => time >= onset && self.health_state_at(time) != HealthState::Recovered,
            None => false,
        }
    }
}
