//! Categorical sampling primitives.

use crate::prng::next_float;
use rand::RngCore;

/// Uniform index into a collection of `len` items, one draw.
///
/// Returns `None` (after consuming no draw) when `len == 0`.
pub fn random_index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let idx = (next_float(rng) * len as f64).floor() as usize;
    Some(idx.min(len - 1))
}

/// Uniform pick from `items`, one draw.
pub fn random_item<'a, R: RngCore + ?Sized, T>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    random_index(rng, items.len()).map(|i| &items[i])
}

/// Pick `min(count, len)` distinct items via a partial Fisher-Yates shuffle
/// of a copy, one draw per swap position.
pub fn random_items<R: RngCore + ?Sized, T: Clone>(rng: &mut R, items: &[T], count: usize) -> Vec<T> {
    let mut pool = items.to_vec();
    let n = count.min(pool.len());
    for i in 0..n {
        let j = i + (next_float(rng) * (pool.len() - i) as f64).floor() as usize;
        pool.swap(i, j);
    }
    pool.truncate(n);
    pool
}

/// Pick an index from a weighted distribution, one draw.
///
/// Weights need not sum to 1. The draw `r = U * total` is walked down the
/// list and the first index where `r <= 0` wins. If rounding leaves `r > 0`
/// after the last weight, the last index is returned. An all-zero table
/// always yields index 0; an empty table yields 0 as well.
pub fn weighted_index<R: RngCore + ?Sized>(rng: &mut R, weights: &[f64]) -> usize {
    let total: f64 = weights.iter().sum();
    let mut r = next_float(rng) * total;
    for (i, w) in weights.iter().enumerate() {
        r -= w;
        if r <= 0.0 {
            return i;
        }
    }
    weights.len().saturating_sub(1)
}

/// Weighted pick from `items`, where `weights[i]` belongs to `items[i]`.
pub fn weighted_item<R: RngCore + ?Sized, T: Copy>(rng: &mut R, items: &[T], weights: &[f64]) -> T {
    items[weighted_index(rng, weights).min(items.len() - 1)]
}

/// Draw up to `count` distinct items, each pick weighted by the remaining
/// items' weights. One draw per pick.
pub fn weighted_sample_without_replacement<R: RngCore + ?Sized, T: Copy>(
    rng: &mut R,
    items: &[T],
    weights: &[f64],
    count: usize,
) -> Vec<T> {
    let mut available = items.to_vec();
    let mut remaining = weights.to_vec();
    let mut picked = Vec::with_capacity(count.min(items.len()));

    while picked.len() < count && !available.is_empty() {
        let idx = weighted_index(rng, &remaining).min(available.len() - 1);
        picked.push(available.remove(idx));
        remaining.remove(idx);
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::{ConstantStream, Mulberry32};

    const TIER_WEIGHTS: [f64; 5] = [0.40, 0.30, 0.18, 0.09, 0.03];

    #[test]
    fn test_weighted_index_high_draw_picks_rarest() {
        let mut rng = ConstantStream::from_fraction(0.99);
        assert_eq!(weighted_index(&mut rng, &TIER_WEIGHTS), 4);
    }

    #[test]
    fn test_weighted_index_low_draw_picks_first() {
        let mut rng = ConstantStream::from_fraction(0.0);
        // r starts at 0, so the first subtraction already reaches <= 0.
        assert_eq!(weighted_index(&mut rng, &TIER_WEIGHTS), 0);
    }

    #[test]
    fn test_weighted_index_boundary_belongs_to_lower_bucket() {
        // 0.5 * 1.0 - 0.4 = 0.1 > 0, then - 0.3 <= 0.
        let mut rng = ConstantStream::from_fraction(0.5);
        assert_eq!(weighted_index(&mut rng, &TIER_WEIGHTS), 1);
    }

    #[test]
    fn test_weighted_index_all_zero_picks_first() {
        // r = U * 0 = 0 and 0 - 0 <= 0 on the first entry.
        let mut rng = Mulberry32::new(1);
        assert_eq!(weighted_index(&mut rng, &[0.0, 0.0, 0.0]), 0);
    }

    #[test]
    fn test_weighted_index_rounding_remainder_falls_to_last() {
        // Weights summing below the draw can only happen through rounding;
        // NaN totals exercise the same fallback path deterministically.
        let mut rng = ConstantStream::from_fraction(0.5);
        assert_eq!(weighted_index(&mut rng, &[f64::NAN, 1.0, 1.0]), 2);
    }

    #[test]
    fn test_weighted_index_empty_table() {
        let mut rng = Mulberry32::new(1);
        assert_eq!(weighted_index(&mut rng, &[]), 0);
    }

    #[test]
    fn test_weighted_index_frequencies() {
        let mut rng = Mulberry32::new(42);
        let mut counts = [0usize; 5];
        let n = 50_000;
        for _ in 0..n {
            counts[weighted_index(&mut rng, &TIER_WEIGHTS)] += 1;
        }
        for (count, weight) in counts.iter().zip(TIER_WEIGHTS) {
            let observed = *count as f64 / n as f64;
            assert!((observed - weight).abs() < 0.01, "{observed} vs {weight}");
        }
    }

    #[test]
    fn test_random_items_distinct_and_bounded() {
        let mut rng = Mulberry32::new(7331);
        let pool = ["a", "b", "c", "d", "e"];
        for count in 0..8 {
            let picked = random_items(&mut rng, &pool, count);
            assert_eq!(picked.len(), count.min(pool.len()));
            let mut sorted = picked.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), picked.len());
        }
    }

    #[test]
    fn test_random_items_constant_draw() {
        // j = i + floor(0.5 * (len - i)): swaps 0<->2, then 1<->2.
        let mut rng = ConstantStream::from_fraction(0.5);
        let picked = random_items(&mut rng, &[1, 2, 3, 4], 2);
        assert_eq!(picked, vec![3, 1]);
    }

    #[test]
    fn test_random_item_empty() {
        let mut rng = Mulberry32::new(1);
        let empty: [u8; 0] = [];
        assert!(random_item(&mut rng, &empty).is_none());
    }

    #[test]
    fn test_weighted_sample_without_replacement_is_unique() {
        let mut rng = Mulberry32::new(42);
        let items = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let weights = [0.30, 0.18, 0.16, 0.12, 0.09, 0.07, 0.05, 0.03];
        for count in 1..=10 {
            let picked = weighted_sample_without_replacement(&mut rng, &items, &weights, count);
            assert_eq!(picked.len(), count.min(items.len()));
            let mut sorted = picked.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), picked.len());
        }
    }
}
