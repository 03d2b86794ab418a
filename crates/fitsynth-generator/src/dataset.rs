use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use fitsynth_core::model::{Event, Segment, Session, Subscription, User};
use fitsynth_core::GeneratorConfig;

use crate::error::Result;
use crate::installs::InstallGenerator;
use crate::simulator::Simulator;

/// The four tables produced by one generation pass.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub events: Vec<Event>,
    pub sessions: Vec<Session>,
    pub subscriptions: Vec<Subscription>,
}

/// Row counts per table, plus the segment mix of the user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub users: usize,
    pub events: usize,
    pub sessions: usize,
    pub subscriptions: usize,
    pub users_by_segment: BTreeMap<Segment, usize>,
}

impl Dataset {
    /// Run installs then the simulator, drawing from `rng` throughout.
    pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let users = InstallGenerator::new()?.generate(config, rng);
        info!(
            users = users.len(),
            days = config.days(),
            "installs generated"
        );

        let activity = Simulator::new()?.run(&users, rng);
        info!(
            events = activity.events.len(),
            sessions = activity.sessions.len(),
            subscriptions = activity.subscriptions.len(),
            "activity simulated"
        );

        Ok(Self {
            users,
            events: activity.events,
            sessions: activity.sessions,
            subscriptions: activity.subscriptions,
        })
    }

    /// Seed a `StdRng` from `config.seed` and generate.
    pub fn generate_seeded(config: &GeneratorConfig) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Self::generate(config, &mut rng)
    }

    pub fn summary(&self) -> DatasetSummary {
        let mut users_by_segment: BTreeMap<Segment, usize> =
            Segment::ALL.iter().map(|&s| (s, 0)).collect();
        for user in &self.users {
            *users_by_segment.entry(user.segment).or_default() += 1;
        }
        DatasetSummary {
            users: self.users.len(),
            events: self.events.len(),
            sessions: self.sessions.len(),
            subscriptions: self.subscriptions.len(),
            users_by_segment,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::GeneratorError;

    #[test]
    fn summary_counts_every_segment() {
        let cfg = GeneratorConfig {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 2).expect("date"),
            installs_first_day: 50,
            installs_last_day: 70,
            ..GeneratorConfig::default()
        };
        let dataset = Dataset::generate_seeded(&cfg).expect("generate");
        let summary = dataset.summary();

        assert_eq!(summary.users, 120);
        assert_eq!(summary.users_by_segment.len(), 3);
        assert_eq!(summary.users_by_segment.values().sum::<usize>(), 120);
        assert_eq!(summary.events, dataset.events.len());
    }

    #[test]
    fn invalid_config_is_rejected_before_sampling() {
        let cfg = GeneratorConfig {
            installs_last_day: 0,
            ..GeneratorConfig::default()
        };
        let err = Dataset::generate_seeded(&cfg).expect_err("zero installs");
        assert!(matches!(err, GeneratorError::Core(_)));
    }

    #[test]
    fn empty_summary_serializes_segment_keys() {
        let summary = Dataset::default().summary();
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["users_by_segment"]["casual"], 0);
        assert_eq!(json["users_by_segment"]["enthusiast"], 0);
    }
}
