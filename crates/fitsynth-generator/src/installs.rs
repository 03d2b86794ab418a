//! Install generator: one `User` row per simulated install, with the
//! behavioral segment assigned from channel-adjusted weights.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use tracing::debug;

use fitsynth_core::model::{Channel, Country, Device, Gender, Segment, User};
use fitsynth_core::probabilities::{
    segment_weights, CHANNEL_WEIGHTS, COUNTRY_WEIGHTS, GENDER_WEIGHTS,
};
use fitsynth_core::GeneratorConfig;

use crate::error::Result;
use crate::sampling::{clipped, normal, seconds_between, Weighted};

const FIRST_USER_ID: u64 = 1_000_001;
const AGE_MEAN: f64 = 32.0;
const AGE_SD: f64 = 8.0;
const AGE_MIN: f64 = 16.0;
const AGE_MAX: f64 = 65.0;
const LAST_SECOND_OF_DAY: i64 = 86_399;

/// `days` evenly spaced counts from `first` to `last` inclusive, each
/// rounded half-to-even.
pub fn daily_install_curve(days: usize, first: u32, last: u32) -> Vec<u32> {
    match days {
        0 => Vec::new(),
        1 => vec![first],
        _ => {
            let (first, last) = (f64::from(first), f64::from(last));
            let step = (last - first) / (days - 1) as f64;
            (0..days)
                .map(|i| {
                    let value = if i == days - 1 {
                        last
                    } else {
                        first + i as f64 * step
                    };
                    value.round_ties_even() as u32
                })
                .collect()
        }
    }
}

/// Categorical tables used for every install, built once per run.
#[derive(Debug, Clone)]
pub struct InstallGenerator {
    genders: Weighted<Gender>,
    channels: Weighted<Channel>,
    countries: Weighted<Country>,
    /// Segment sampler per channel, index-aligned with `Channel::ALL`.
    segments: Vec<Weighted<Segment>>,
}

impl InstallGenerator {
    pub fn new() -> Result<Self> {
        let segments = Channel::ALL
            .iter()
            .map(|&channel| Weighted::new(&Segment::ALL, &segment_weights(channel)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            genders: Weighted::new(&Gender::ALL, &GENDER_WEIGHTS)?,
            channels: Weighted::new(&Channel::ALL, &CHANNEL_WEIGHTS)?,
            countries: Weighted::new(&Country::ALL, &COUNTRY_WEIGHTS)?,
            segments,
        })
    }

    /// Generate every install over the configured range, day by day.
    pub fn generate<R: Rng + ?Sized>(&self, config: &GeneratorConfig, rng: &mut R) -> Vec<User> {
        let curve = daily_install_curve(
            config.days(),
            config.installs_first_day,
            config.installs_last_day,
        );
        let total: usize = curve.iter().map(|&n| n as usize).sum();
        let mut users = Vec::with_capacity(total);
        let mut next_id = FIRST_USER_ID;

        for (offset, &installs) in curve.iter().enumerate() {
            let day = config.start_date + Duration::days(offset as i64);
            for _ in 0..installs {
                users.push(self.install(day, next_id, rng));
                next_id += 1;
            }
            debug!(day = %day, installs, "day generated");
        }
        users
    }

    /// Assign a segment for a user acquired through `channel`.
    pub fn assign_segment<R: Rng + ?Sized>(&self, channel: Channel, rng: &mut R) -> Segment {
        self.segments[channel as usize].sample(rng)
    }

    fn install<R: Rng + ?Sized>(&self, day: NaiveDate, id: u64, rng: &mut R) -> User {
        let age = clipped(normal(rng, AGE_MEAN, AGE_SD), AGE_MIN, AGE_MAX);
        let gender = self.genders.sample(rng);
        let channel = self.channels.sample(rng);
        let device = Device::ALL[rng.gen_range(0..Device::ALL.len())];
        let country = self.countries.sample(rng);
        let segment = self.assign_segment(channel, rng);
        let install_date = day.and_time(chrono::NaiveTime::MIN)
            + Duration::seconds(seconds_between(rng, 0, LAST_SECOND_OF_DAY));

        User {
            user_id: format!("U{id}"),
            install_date,
            age,
            gender,
            acquisition_channel: channel,
            device_type: device,
            country,
            segment,
        }
    }
}
