//! Unit tests for visit generation.

#[cfg(test)]
mod fixtures {
    use epi_core::{
        Contact, Exposure, HealthTransition, LocationUuid, SimDuration, SimTime, TestResult,
        Timestep,
    };
    use epi_risk::{ContactTracingPolicy, RiskScore, TestPolicy, VisitAdjustment};

    /// Risk score returning a fixed adjustment for one location and the
    /// default for every other.
    pub struct PerLocationScore {
        pub location_uuid: LocationUuid,
        pub adjustment: VisitAdjustment,
    }

    impl RiskScore for PerLocationScore {
        fn add_health_state_transition(&mut self, _transition: HealthTransition) {}
        fn add_exposures(&mut self, _exposures: &[&Exposure]) {}
        fn add_exposure_notification(&mut self, _contact: &Contact, _result: &TestResult) {}
        fn add_test_result(&mut self, _result: &TestResult) {}

        fn visit_adjustment(
            &self,
            _timestep: &Timestep,
            location_uuid: LocationUuid,
        ) -> VisitAdjustment {
            if location_uuid == self.location_uuid {
                self.adjustment
            } else {
                VisitAdjustment::default()
            }
        }

        fn test_policy(&self, _timestep: &Timestep) -> TestPolicy {
            TestPolicy::default()
        }

        fn contact_tracing_policy(&self) -> ContactTracingPolicy {
            ContactTracingPolicy::default()
        }

        fn contact_retention_duration(&self) -> SimDuration {
            SimDuration::INFINITE
        }
    }

    pub fn day() -> Timestep {
        Timestep::new(SimTime::EPOCH, SimDuration::days(1))
    }
}

#[cfg(test)]
mod duration_specified {
    use epi_core::{AgentRng, AgentUuid, LocationUuid, SimDuration, Timestep, Visit};
    use epi_risk::{NullRiskScore, VisitAdjustment};

    use super::fixtures::{day, PerLocationScore};
    use crate::{DurationSpecifiedVisitGenerator, LocationDuration, VisitGenerator};

    fn fixed(location_uuid: i64, units: f32) -> LocationDuration {
        LocationDuration {
            location_uuid: LocationUuid(location_uuid),
            sample_duration: Box::new(move |adjustment, _rng| units * adjustment),
        }
    }

    fn assert_partitions(visits: &[Visit], timestep: &Timestep) {
        assert!(!visits.is_empty());
        assert_eq!(visits.first().unwrap().start_time, timestep.start_time());
        assert_eq!(visits.last().unwrap().end_time, timestep.end_time());
        for pair in visits.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time);
        }
        for visit in visits {
            assert!(visit.end_time > visit.start_time);
        }
    }

    #[test]
    fn partitions_timestep_proportionally() {
        let generator = DurationSpecifiedVisitGenerator::new(vec![
            fixed(1, 1.0),
            fixed(2, 3.0),
        ]);
        let timestep = day();
        let mut rng = AgentRng::new(42, AgentUuid(0));
        let visits = generator.generate_visits(&timestep, &NullRiskScore, &mut rng);

        assert_partitions(&visits, &timestep);
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].location_uuid, LocationUuid(1));
        assert_eq!(visits[0].duration(), SimDuration::hours(6));
        assert_eq!(visits[1].location_uuid, LocationUuid(2));
        assert_eq!(visits[1].duration(), SimDuration::hours(18));
    }

    #[test]
    fn visits_come_out_unassigned() {
        let generator = DurationSpecifiedVisitGenerator::new(vec![fixed(1, 1.0)]);
        let mut rng = AgentRng::new(42, AgentUuid(0));
        let visits = generator.generate_visits(&day(), &NullRiskScore, &mut rng);
        for visit in &visits {
            assert_eq!(visit.agent_uuid, AgentUuid::INVALID);
        }
    }

    #[test]
    fn frequency_zero_suppresses_location() {
        let generator = DurationSpecifiedVisitGenerator::new(vec![
            fixed(1, 1.0),
            fixed(2, 1.0),
        ]);
        let score = PerLocationScore {
            location_uuid: LocationUuid(1),
            adjustment: VisitAdjustment { frequency_adjustment: 0.0, duration_adjustment: 1.0 },
        };
        let timestep = day();
        let mut rng = AgentRng::new(42, AgentUuid(0));
        let visits = generator.generate_visits(&timestep, &score, &mut rng);

        assert_partitions(&visits, &timestep);
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].location_uuid, LocationUuid(2));
        assert_eq!(visits[0].duration(), timestep.duration());
    }

    #[test]
    fn duration_adjustment_shrinks_share() {
        let generator = DurationSpecifiedVisitGenerator::new(vec![
            fixed(1, 1.0),
            fixed(2, 1.0),
        ]);
        let score = PerLocationScore {
            location_uuid: LocationUuid(1),
            // Location 1 samples 0.5 units against location 2's 1.0.
            adjustment: VisitAdjustment { frequency_adjustment: 1.0, duration_adjustment: 0.5 },
        };
        let timestep = day();
        let mut rng = AgentRng::new(42, AgentUuid(0));
        let visits = generator.generate_visits(&timestep, &score, &mut rng);

        assert_partitions(&visits, &timestep);
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].duration(), SimDuration::hours(8));
        assert_eq!(visits[1].duration(), SimDuration::hours(16));
    }

    #[test]
    fn all_zero_falls_back_to_first_location() {
        let generator = DurationSpecifiedVisitGenerator::new(vec![
            fixed(1, 0.0),
            fixed(2, 0.0),
        ]);
        let timestep = day();
        let mut rng = AgentRng::new(42, AgentUuid(0));
        let visits = generator.generate_visits(&timestep, &NullRiskScore, &mut rng);

        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].location_uuid, LocationUuid(1));
        assert_eq!(visits[0].start_time, timestep.start_time());
        assert_eq!(visits[0].end_time, timestep.end_time());
    }

    #[test]
    fn empty_plan_yields_no_visits() {
        let generator = DurationSpecifiedVisitGenerator::new(Vec::new());
        let mut rng = AgentRng::new(42, AgentUuid(0));
        assert!(generator.generate_visits(&day(), &NullRiskScore, &mut rng).is_empty());
    }
}

#[cfg(test)]
mod indexed {
    use epi_core::{AgentRng, AgentUuid, LocationUuid};
    use epi_risk::NullRiskScore;

    use super::fixtures::day;
    use crate::{IndexedLocationVisitGenerator, VisitGenerator};

    #[test]
    fn covers_every_location_and_partitions() {
        let generator = IndexedLocationVisitGenerator::new([
            LocationUuid(10),
            LocationUuid(20),
            LocationUuid(30),
        ]);
        let timestep = day();
        let mut rng = AgentRng::new(42, AgentUuid(0));
        let visits = generator.generate_visits(&timestep, &NullRiskScore, &mut rng);

        assert_eq!(visits.len(), 3);
        assert_eq!(visits[0].start_time, timestep.start_time());
        assert_eq!(visits[2].end_time, timestep.end_time());
        for pair in visits.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time);
        }
        let locations: Vec<_> = visits.iter().map(|v| v.location_uuid).collect();
        assert_eq!(locations, vec![LocationUuid(10), LocationUuid(20), LocationUuid(30)]);
    }

    #[test]
    fn same_seed_same_plan() {
        let generator = IndexedLocationVisitGenerator::new([LocationUuid(1), LocationUuid(2)]);
        let timestep = day();
        let a = generator.generate_visits(
            &timestep,
            &NullRiskScore,
            &mut AgentRng::new(7, AgentUuid(3)),
        );
        let b = generator.generate_visits(
            &timestep,
            &NullRiskScore,
            &mut AgentRng::new(7, AgentUuid(3)),
        );
        assert_eq!(a, b);
    }
}
