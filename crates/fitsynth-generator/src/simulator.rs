//! Per-user funnel, session and subscription simulation.
//!
//! Each user is processed independently and in table order, with every
//! draw taken from the one RNG passed in by the caller.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;

use fitsynth_core::model::{
    Event, EventType, Plan, Segment, Session, Subscription, User, WorkoutType,
};
use fitsynth_core::probabilities::PLAN_WEIGHTS;

use crate::error::Result;
use crate::sampling::{clipped, exponential, normal, poisson, seconds_between, uniform, Weighted};

const FIRST_SESSION_ID: u64 = 5_000_001;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;

pub const SESSION_MINS: (f64, f64) = (3.0, 240.0);
pub const WEEK1_SESSION_MINS: (f64, f64) = (3.0, 180.0);
pub const WORKOUT_MINS: (f64, f64) = (5.0, 180.0);
const WORKOUT_SD: f64 = 10.0;
const KCAL_PER_MIN: (f64, f64) = (6.0, 10.0);
const SUBSCRIPTION_DAYS: (f64, f64) = (1.0, 90.0);

/// Rows produced by the simulator, in generation order.
#[derive(Debug, Default, Clone)]
pub struct Activity {
    pub events: Vec<Event>,
    pub sessions: Vec<Session>,
    pub subscriptions: Vec<Subscription>,
}

#[derive(Debug, Clone)]
pub struct Simulator {
    plans: Weighted<Plan>,
    next_session_id: u64,
}

/// `at` plus a uniform whole number of seconds in
/// `[min_hours h, max_days d]`.
fn after<R: Rng + ?Sized>(
    rng: &mut R,
    at: NaiveDateTime,
    min_hours: i64,
    max_days: i64,
) -> NaiveDateTime {
    at + Duration::seconds(seconds_between(
        rng,
        min_hours * SECS_PER_HOUR,
        max_days * SECS_PER_DAY,
    ))
}

/// `at` plus `lo..=hi` whole days and a random second within that day.
fn some_day_after<R: Rng + ?Sized>(
    rng: &mut R,
    at: NaiveDateTime,
    lo: i64,
    hi: i64,
) -> NaiveDateTime {
    let days = rng.gen_range(lo..=hi);
    let secs = seconds_between(rng, 0, SECS_PER_DAY - 1);
    at + Duration::days(days) + Duration::seconds(secs)
}

impl Simulator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            plans: Weighted::new(&Plan::ALL, &PLAN_WEIGHTS)?,
            next_session_id: FIRST_SESSION_ID,
        })
    }

    pub fn run<R: Rng + ?Sized>(&mut self, users: &[User], rng: &mut R) -> Activity {
        let mut out = Activity::default();
        for user in users {
            self.simulate_user(user, rng, &mut out);
        }
        out
    }

    pub fn simulate_user<R: Rng + ?Sized>(&mut self, user: &User, rng: &mut R, out: &mut Activity) {
        self.funnel(user, rng, out);
        self.week1_return(user, rng, out);
        self.background_sessions(user, rng, out);
        self.subscription(user, rng, out);
    }

    fn funnel<R: Rng + ?Sized>(&self, user: &User, rng: &mut R, out: &mut Activity) {
        let rates = user.segment.conversion();
        let uid = user.user_id.as_str();

        if !rng.gen_bool(rates.create_account) {
            return;
        }
        let account = after(rng, user.install_date, 1, 3);
        out.events
            .push(Event::milestone(uid, EventType::AccountCreated, account));

        if !rng.gen_bool(rates.profile_setup) {
            return;
        }
        let profile = after(rng, account, 0, 7);
        out.events
            .push(Event::milestone(uid, EventType::ProfileSetup, profile));

        if !rng.gen_bool(rates.first_workout) {
            return;
        }
        let at = after(rng, profile, 0, 14);
        out.events.push(first_workout(uid, user.segment, at, rng));
    }

    fn week1_return<R: Rng + ?Sized>(&mut self, user: &User, rng: &mut R, out: &mut Activity) {
        if !rng.gen_bool(user.segment.conversion().week1_retention) {
            return;
        }
        let at = some_day_after(rng, user.install_date, 7, 14);
        let (lo, hi) = WEEK1_SESSION_MINS;
        let duration = clipped(exponential(rng, 25.0), lo, hi);
        let session = self.session(user, at, duration);
        out.sessions.push(session);
        out.events
            .push(Event::milestone(&user.user_id, EventType::Week1Return, at));
    }

    fn background_sessions<R: Rng + ?Sized>(
        &mut self,
        user: &User,
        rng: &mut R,
        out: &mut Activity,
    ) {
        let (lo, hi) = SESSION_MINS;
        for _ in 0..poisson(rng, user.segment.mean_sessions()) {
            let start = some_day_after(rng, user.install_date, 0, 29);
            let duration = clipped(exponential(rng, 30.0), lo, hi);
            let session = self.session(user, start, duration);
            out.sessions.push(session);
        }
    }

    fn subscription<R: Rng + ?Sized>(&self, user: &User, rng: &mut R, out: &mut Activity) {
        if !rng.gen_bool(user.segment.conversion().premium) {
            return;
        }
        let (lo, hi) = SUBSCRIPTION_DAYS;
        let days = clipped(exponential(rng, 14.0), lo, hi);
        let plan = self.plans.sample(rng);
        out.subscriptions.push(Subscription {
            user_id: user.user_id.clone(),
            subscription_date: user.install_date + Duration::days(i64::from(days)),
            plan,
            price_usd: plan.price_usd(),
        });
    }

    fn session(&mut self, user: &User, start: NaiveDateTime, duration_mins: u32) -> Session {
        let session_id = format!("S{}", self.next_session_id);
        self.next_session_id += 1;
        Session {
            user_id: user.user_id.clone(),
            session_id,
            session_start: start,
            session_duration_mins: duration_mins,
        }
    }
}

fn first_workout<R: Rng + ?Sized>(
    uid: &str,
    segment: Segment,
    at: NaiveDateTime,
    rng: &mut R,
) -> Event {
    let workout = WorkoutType::ALL[rng.gen_range(0..WorkoutType::ALL.len())];
    let (lo, hi) = WORKOUT_MINS;
    let duration = clipped(
        normal(rng, segment.first_workout_mean_mins(), WORKOUT_SD),
        lo,
        hi,
    );
    let (kcal_lo, kcal_hi) = KCAL_PER_MIN;
    let calories = (f64::from(duration) * uniform(rng, kcal_lo, kcal_hi)).trunc() as u32;

    Event {
        user_id: uid.to_string(),
        event_type: EventType::FirstWorkout,
        event_timestamp: at,
        workout_type: Some(workout),
        duration_mins: Some(duration),
        calories: Some(calories),
    }
}
