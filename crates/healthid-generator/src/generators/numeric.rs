//! Numeric sampling primitives.

use crate::prng::next_float;
use rand::RngCore;
use std::f64::consts::PI;

/// Random integer in `[min, max]` (inclusive), one draw.
pub fn random_int<R: RngCore + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    (next_float(rng) * (max - min + 1) as f64).floor() as i64 + min
}

/// Random float in `[min, max)`, one draw.
pub fn random_float<R: RngCore + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    next_float(rng) * (max - min) + min
}

/// `base + U * spread`, one draw. Used for the conversion and budget
/// fractions, which are specified as a base rate plus a random spread.
pub fn fraction<R: RngCore + ?Sized>(rng: &mut R, base: f64, spread: f64) -> f64 {
    base + next_float(rng) * spread
}

/// Normally distributed value via the Box-Muller transform.
///
/// Consumes two draws, plus one more for each draw that is exactly zero.
pub fn normal_distribution<R: RngCore + ?Sized>(rng: &mut R, mean: f64, stddev: f64) -> f64 {
    let mut u = 0.0;
    let mut v = 0.0;
    while u == 0.0 {
        u = next_float(rng);
    }
    while v == 0.0 {
        v = next_float(rng);
    }
    let z = (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos();
    mean + z * stddev
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round to `decimals` places, halves toward positive infinity.
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    round_half_up(x * factor) / factor
}

/// `round_half_up(normal(mean, stddev))` clamped to `[min, max]`.
pub fn clamped_normal<R: RngCore + ?Sized>(
    rng: &mut R,
    mean: f64,
    stddev: f64,
    min: u32,
    max: u32,
) -> u32 {
    let value = round_half_up(normal_distribution(rng, mean, stddev));
    value.clamp(min as f64, max as f64) as u32
}
