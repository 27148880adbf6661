//! Random sampling of keys and values.
//!
//! Keys are non-empty byte strings drawn from the alphabet `1..=255`. The
//! zero byte is excluded so every key survives a round trip through a
//! C-string literal, where `0x00` terminates the string early. Values leave
//! [`NOT_FOUND`] unused so lookup wrappers can return it to mean "absent".

use rand::Rng;

use crate::{Key, NOT_FOUND};

/// Sample one key with a length drawn uniformly from `min_len..=max_len`.
///
/// Each byte is drawn uniformly from `1..=255`. Callers are expected to
/// validate the bounds first (see [`crate::CorpusConfig::validate`]); an
/// inverted range panics.
pub fn sample_key<R: Rng + ?Sized>(rng: &mut R, min_len: usize, max_len: usize) -> Key {
    debug_assert!(min_len >= 1);
    debug_assert!(min_len <= max_len);
    let len = rng.gen_range(min_len..=max_len);
    let mut key = vec![0u8; len];
    for b in &mut key {
        *b = rng.gen_range(1..=255);
    }
    key
}

/// Sample `count` keys independently. Duplicates and prefix relations are
/// allowed here; [`crate::prefix_free_subset`] cleans them up later.
pub fn sample_keys<R: Rng + ?Sized>(
    rng: &mut R,
    min_len: usize,
    max_len: usize,
    count: usize,
) -> Vec<Key> {
    (0..count).map(|_| sample_key(rng, min_len, max_len)).collect()
}

/// Sample one value uniformly from `0..=u64::MAX - 1`.
///
/// [`NOT_FOUND`] is held back as the miss sentinel and never produced.
pub fn sample_value<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen_range(0..NOT_FOUND)
}
