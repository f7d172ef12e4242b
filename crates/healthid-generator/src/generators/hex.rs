//! Opaque hex fingerprints and prefixed identifiers.

use crate::prng::next_float;
use rand::RngCore;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Nibbles in a proof hash.
pub const HASH_LEN: usize = 64;

/// Nibbles after the `prefix_` of an id.
pub const ID_SUFFIX_LEN: usize = 8;

/// One lowercase hex digit, one draw.
fn hex_digit<R: RngCore + ?Sized>(rng: &mut R) -> char {
    let nibble = (next_float(rng) * 16.0).floor() as usize;
    HEX_DIGITS[nibble.min(15)] as char
}

fn hex_string<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| hex_digit(rng)).collect()
}

/// 64 lowercase hex digits, no prefix. Not a cryptographic digest.
pub fn generate_hash<R: RngCore + ?Sized>(rng: &mut R) -> String {
    hex_string(rng, HASH_LEN)
}

/// `0x` followed by [`generate_hash`].
pub fn generate_prefixed_hash<R: RngCore + ?Sized>(rng: &mut R) -> String {
    format!("0x{}", generate_hash(rng))
}

/// `{prefix}_` followed by 8 lowercase hex digits.
pub fn generate_id<R: RngCore + ?Sized>(rng: &mut R, prefix: &str) -> String {
    format!("{prefix}_{}", hex_string(rng, ID_SUFFIX_LEN))
}

/// True when `s` is exactly `len` lowercase hex digits.
pub fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| HEX_DIGITS.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::Mulberry32;

    #[test]
    fn test_generate_hash_seed_42() {
        let mut rng = Mulberry32::new(42);
        assert_eq!(
            generate_hash(&mut rng),
            "97da2849d73eb438a907d090402c802d7c5700893a34bd83441aabe1f6f21057"
        );
    }

    #[test]
    fn test_generate_id_seed_1337() {
        let mut rng = Mulberry32::new(1337);
        assert_eq!(generate_id(&mut rng, "cmp"), "cmp_23ca6688");
    }

    #[test]
    fn test_id_shares_stream_with_hash() {
        // An id consumes exactly eight draws from the same stream.
        let mut rng = Mulberry32::new(42);
        assert_eq!(generate_id(&mut rng, "hid"), "hid_97da2849");
        assert_eq!(generate_id(&mut rng, "anon"), "anon_d73eb438");
    }

    #[test]
    fn test_prefixed_hash() {
        let mut rng = Mulberry32::new(7);
        let hash = generate_prefixed_hash(&mut rng);
        assert!(hash.starts_with("0x"));
        assert!(is_lower_hex(&hash[2..], HASH_LEN));
    }

    #[test]
    fn test_is_lower_hex() {
        assert!(is_lower_hex("00ff", 4));
        assert!(!is_lower_hex("00FF", 4));
        assert!(!is_lower_hex("00f", 4));
        assert!(!is_lower_hex("0xff", 4));
    }
}
