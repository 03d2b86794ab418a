//! Fixed sampling weights and per-segment conversion rates.
//!
//! Weight arrays are index-aligned with the matching enum's `ALL` constant.

use crate::model::{Channel, Segment};

pub const GENDER_WEIGHTS: [f64; 3] = [0.48, 0.48, 0.04];
pub const CHANNEL_WEIGHTS: [f64; 5] = [0.40, 0.30, 0.18, 0.08, 0.04];
pub const COUNTRY_WEIGHTS: [f64; 6] = [0.40, 0.20, 0.12, 0.08, 0.12, 0.08];
pub const PLAN_WEIGHTS: [f64; 2] = [0.75, 0.25];

/// Segment weights before any channel adjustment, aligned with `Segment::ALL`.
pub const BASE_SEGMENT_WEIGHTS: [f64; 3] = [0.60, 0.30, 0.10];

/// Bernoulli gates for one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRates {
    pub create_account: f64,
    pub profile_setup: f64,
    pub first_workout: f64,
    pub week1_retention: f64,
    pub premium: f64,
}

impl Segment {
    pub fn conversion(self) -> ConversionRates {
        match self {
            Segment::Casual => ConversionRates {
                create_account: 0.75,
                profile_setup: 0.50,
                first_workout: 0.35,
                week1_retention: 0.20,
                premium: 0.02,
            },
            Segment::Committed => ConversionRates {
                create_account: 0.90,
                profile_setup: 0.80,
                first_workout: 0.70,
                week1_retention: 0.45,
                premium: 0.10,
            },
            Segment::Enthusiast => ConversionRates {
                create_account: 0.98,
                profile_setup: 0.95,
                first_workout: 0.90,
                week1_retention: 0.75,
                premium: 0.35,
            },
        }
    }

    /// Poisson mean for background sessions over the first 30 days.
    pub fn mean_sessions(self) -> f64 {
        match self {
            Segment::Casual => 2.0,
            Segment::Committed => 8.0,
            Segment::Enthusiast => 18.0,
        }
    }

    /// Mean of the first-workout duration distribution, in minutes.
    pub fn first_workout_mean_mins(self) -> f64 {
        match self {
            Segment::Casual => 20.0,
            Segment::Committed | Segment::Enthusiast => 35.0,
        }
    }
}

/// Additive shift applied to `BASE_SEGMENT_WEIGHTS` for a channel.
pub fn channel_adjustment(channel: Channel) -> [f64; 3] {
    match channel {
        Channel::Social => [0.05, 0.0, -0.02],
        Channel::PaidSearch => [-0.02, 0.04, 0.0],
        Channel::Referral => [-0.03, 0.0, 0.05],
        Channel::Organic | Channel::Email => [0.0, 0.0, 0.0],
    }
}

/// Channel-adjusted segment weights, renormalized to sum to 1.
pub fn segment_weights(channel: Channel) -> [f64; 3] {
    let shift = channel_adjustment(channel);
    let mut weights = [0.0; 3];
    for (i, w) in weights.iter_mut().enumerate() {
        *w = BASE_SEGMENT_WEIGHTS[i] + shift[i];
    }
    let total: f64 = weights.iter().sum();
    weights.map(|w| w / total)
}
