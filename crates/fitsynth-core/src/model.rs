use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Behavioral cohort driving every downstream conversion probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Casual,
    Committed,
    Enthusiast,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Casual, Segment::Committed, Segment::Enthusiast];

    pub fn as_str(self) -> &'static str {
        match self {
            Segment::Casual => "casual",
            Segment::Committed => "committed",
            Segment::Enthusiast => "enthusiast",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
}

/// Acquisition source attributed to a user at install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Organic,
    Social,
    PaidSearch,
    Referral,
    Email,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::Organic,
        Channel::Social,
        Channel::PaidSearch,
        Channel::Referral,
        Channel::Email,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    #[serde(rename = "iOS")]
    Ios,
    Android,
}

impl Device {
    pub const ALL: [Device; 2] = [Device::Ios, Device::Android];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    Pakistan,
    #[serde(rename = "USA")]
    Usa,
    #[serde(rename = "UK")]
    Uk,
    Canada,
    Australia,
    Germany,
}

impl Country {
    pub const ALL: [Country; 6] = [
        Country::Pakistan,
        Country::Usa,
        Country::Uk,
        Country::Canada,
        Country::Australia,
        Country::Germany,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Run,
    Bike,
    Yoga,
    Strength,
    Hiit,
    Walk,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 6] = [
        WorkoutType::Run,
        WorkoutType::Bike,
        WorkoutType::Yoga,
        WorkoutType::Strength,
        WorkoutType::Hiit,
        WorkoutType::Walk,
    ];
}

/// Funnel milestones plus the independent week-one return marker.
///
/// Funnel order is `AccountCreated` → `ProfileSetup` → `FirstWorkout`; a
/// later step is only ever emitted for a user who reached the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    AccountCreated,
    ProfileSetup,
    FirstWorkout,
    #[serde(rename = "week1_return")]
    Week1Return,
}

impl EventType {
    /// The funnel step that must precede this one, if any.
    pub fn predecessor(self) -> Option<EventType> {
        match self {
            EventType::ProfileSetup => Some(EventType::AccountCreated),
            EventType::FirstWorkout => Some(EventType::ProfileSetup),
            EventType::AccountCreated | EventType::Week1Return => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Monthly,
    Yearly,
}

impl Plan {
    pub const ALL: [Plan; 2] = [Plan::Monthly, Plan::Yearly];

    pub fn price_usd(self) -> f64 {
        match self {
            Plan::Monthly => 9.99,
            Plan::Yearly => 79.99,
        }
    }
}

/// One synthesized install. Mirrors the `users.csv` columns exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(with = "crate::timestamp")]
    pub install_date: NaiveDateTime,
    pub age: u32,
    pub gender: Gender,
    pub acquisition_channel: Channel,
    pub device_type: Device,
    pub country: Country,
    pub segment: Segment,
}

/// Mirrors the `events.csv` columns. The workout fields are only populated
/// on `first_workout` rows and serialize as empty cells otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub user_id: String,
    pub event_type: EventType,
    #[serde(with = "crate::timestamp")]
    pub event_timestamp: NaiveDateTime,
    pub workout_type: Option<WorkoutType>,
    pub duration_mins: Option<u32>,
    pub calories: Option<u32>,
}

impl Event {
    pub fn milestone(user_id: &str, event_type: EventType, at: NaiveDateTime) -> Self {
        Self {
            user_id: user_id.to_string(),
            event_type,
            event_timestamp: at,
            workout_type: None,
            duration_mins: None,
            calories: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub session_id: String,
    #[serde(with = "crate::timestamp")]
    pub session_start: NaiveDateTime,
    pub session_duration_mins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub user_id: String,
    #[serde(with = "crate::timestamp")]
    pub subscription_date: NaiveDateTime,
    pub plan: Plan,
    pub price_usd: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_values_use_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&Channel::PaidSearch).expect("serialize"),
            r#""paid_search""#
        );
        assert_eq!(
            serde_json::to_string(&Device::Ios).expect("serialize"),
            r#""iOS""#
        );
        assert_eq!(
            serde_json::to_string(&Country::Usa).expect("serialize"),
            r#""USA""#
        );
        assert_eq!(
            serde_json::to_string(&EventType::Week1Return).expect("serialize"),
            r#""week1_return""#
        );
        assert_eq!(
            serde_json::to_string(&EventType::FirstWorkout).expect("serialize"),
            r#""first_workout""#
        );
    }

    #[test]
    fn funnel_predecessors() {
        assert_eq!(EventType::AccountCreated.predecessor(), None);
        assert_eq!(
            EventType::ProfileSetup.predecessor(),
            Some(EventType::AccountCreated)
        );
        assert_eq!(
            EventType::FirstWorkout.predecessor(),
            Some(EventType::ProfileSetup)
        );
        assert_eq!(EventType::Week1Return.predecessor(), None);
    }

    #[test]
    fn plan_prices_are_fixed() {
        assert_eq!(Plan::Monthly.price_usd(), 9.99);
        assert_eq!(Plan::Yearly.price_usd(), 79.99);
    }
}
