//! Sampling primitives shared by every entity family.
//!
//! Each function consumes a fixed, documented number of draws from the
//! stream it is given, so a family's output depends only on its seed and the
//! order in which it calls these.

pub mod choice;
pub mod hex;
pub mod numeric;
pub mod timestamp;

pub use choice::{
    random_index, random_item, random_items, weighted_index, weighted_item,
    weighted_sample_without_replacement,
};
pub use hex::{generate_hash, generate_id, generate_prefixed_hash};
pub use numeric::{
    clamped_normal, fraction, normal_distribution, random_float, random_int, round_half_up,
    round_to,
};
pub use timestamp::random_date;
