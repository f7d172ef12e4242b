//! Mulberry32: the 32-bit PRNG behind every entity family.
//!
//! The output sequence for a given seed is fixed across implementations, so
//! datasets generated here match datasets generated anywhere else from the
//! same seeds.

use rand::{RngCore, SeedableRng};

const INCREMENT: u32 = 0x6D2B_79F5;

/// 2^32, the divisor that maps a `u32` draw into `[0, 1)`.
const U32_RANGE: f64 = 4_294_967_296.0;

/// Seeded Mulberry32 stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Start a stream from a signed 32-bit seed.
    pub fn new(seed: i32) -> Self {
        Self {
            state: seed as u32,
        }
    }

    /// Next float in `[0, 1)`.
    pub fn next_float(&mut self) -> f64 {
        next_float(self)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i32::from_le_bytes(seed))
    }
}

/// Stream that returns the same value on every draw.
///
/// Useful for pinning a generator to a known point of its input space, e.g.
/// "what does the funnel look like when every draw is 0.5".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantStream {
    value: u32,
}

impl ConstantStream {
    /// A stream whose [`next_float`] is `fraction` truncated to 32 bits.
    /// `fraction` is clamped to `[0, 1)`.
    pub fn from_fraction(fraction: f64) -> Self {
        let scaled = (fraction.clamp(0.0, 1.0) * U32_RANGE).floor();
        Self {
            value: scaled.min(u32::MAX as f64) as u32,
        }
    }
}

impl RngCore for ConstantStream {
    fn next_u32(&mut self) -> u32 {
        self.value
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Map one `u32` draw from any stream into `[0, 1)`.
///
/// Every sampling primitive consumes randomness through this function, one
/// draw per call.
pub fn next_float<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    rng.next_u32() as f64 / U32_RANGE
}
