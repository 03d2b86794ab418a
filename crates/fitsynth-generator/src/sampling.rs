//! Distribution draws on a caller-supplied RNG.
//!
//! Every helper takes `&mut R` so one seeded generator can be threaded
//! through a whole run; nothing here touches a thread-local RNG.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::{GeneratorError, Result};

/// Gaussian draw via the Box-Muller transform.
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    // 1 - u keeps the log argument in (0, 1].
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + z * sd
}

/// Exponential draw with the given mean.
pub fn exponential<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    let u = 1.0 - rng.gen::<f64>();
    -scale * u.ln()
}

/// Poisson draw by Knuth's multiplication method. Fine for the small means
/// used here; cost grows linearly with `lambda`.
pub fn poisson<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> u32 {
    if lambda <= 0.0 {
        return 0;
    }
    let limit = (-lambda).exp();
    let mut k = 0u32;
    let mut p = rng.gen::<f64>();
    while p > limit {
        k += 1;
        p *= rng.gen::<f64>();
    }
    k
}

/// Continuous uniform draw in `[lo, hi)`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    rng.gen_range(lo..hi)
}

/// Integer seconds in `[lo, hi]`, both ends inclusive.
pub fn seconds_between<R: Rng + ?Sized>(rng: &mut R, lo: i64, hi: i64) -> i64 {
    rng.gen_range(lo..=hi)
}

/// Clamp then truncate toward zero.
pub fn clipped(value: f64, lo: f64, hi: f64) -> u32 {
    value.clamp(lo, hi).trunc() as u32
}

/// Categorical sampler over a fixed item table.
#[derive(Debug, Clone)]
pub struct Weighted<T: Copy + 'static> {
    items: &'static [T],
    index: WeightedIndex<f64>,
}

impl<T: Copy + 'static> Weighted<T> {
    pub fn new(items: &'static [T], weights: &[f64]) -> Result<Self> {
        if items.len() != weights.len() {
            return Err(GeneratorError::WeightCount {
                items: items.len(),
                weights: weights.len(),
            });
        }
        Ok(Self {
            items,
            index: WeightedIndex::new(weights)?,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.items[self.index.sample(rng)]
    }
}
