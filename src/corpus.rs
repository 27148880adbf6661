//! Corpus assembly: from a seeded RNG and a configuration to a complete
//! lookup fixture.
//!
//! Assembly oversamples a candidate pool, reduces it to a prefix-free key
//! set, pairs the survivors with values, then samples a second batch of
//! probe material and splits it by failure mode. Identical RNG state and
//! configuration reproduce the fixture byte for byte.

use rand::Rng;
use thiserror::Error;

use crate::classify::partition_probes;
use crate::prefix::prefix_free_subset;
use crate::sample::{sample_keys, sample_value};
use crate::Key;

/// Knobs for corpus assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    /// Shortest key length sampled, in bytes. Must be at least 1.
    pub min_key_len: usize,
    /// Longest key length sampled, in bytes. Must be at least `min_key_len`.
    pub max_key_len: usize,
    /// Requested corpus size. The candidate pool holds `target_size + 1`
    /// keys; prefix filtering then brings the corpus at or below
    /// `target_size`.
    pub target_size: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            min_key_len: 1,
            max_key_len: 32,
            target_size: 50,
        }
    }
}

impl CorpusConfig {
    /// Check the length bounds, before any sampling happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_key_len == 0 {
            return Err(ConfigError::ZeroMinKeyLen);
        }
        if self.max_key_len < self.min_key_len {
            return Err(ConfigError::InvertedKeyLenBounds {
                min: self.min_key_len,
                max: self.max_key_len,
            });
        }
        Ok(())
    }
}

/// A rejected [`CorpusConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_key_len` was zero. Keys are non-empty; an empty key would be a
    /// prefix of every other key and a zero-length C-string literal.
    #[error("min_key_len must be at least 1, got 0")]
    ZeroMinKeyLen,
    /// `max_key_len` was below `min_key_len`, leaving no valid lengths.
    #[error("max_key_len ({max}) must be at least min_key_len ({min})")]
    InvertedKeyLenBounds {
        /// Configured minimum key length.
        min: usize,
        /// Configured maximum key length.
        max: usize,
    },
}

/// A prefix-free key set with one value per key.
///
/// Keys are sorted, unique, and pairwise prefix-free; `values[i]` belongs to
/// `keys[i]`. Values are never [`crate::NOT_FOUND`]. [`assemble`] is the
/// normal way to build one; hand-built instances must uphold the same
/// invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    /// Member keys, sorted.
    pub keys: Vec<Key>,
    /// Values parallel to `keys`.
    pub values: Vec<u64>,
}

impl Corpus {
    /// Number of key-value pairs.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the corpus holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Exact-match lookup, the way a hash map would resolve `key`.
    pub fn get(&self, key: &[u8]) -> Option<u64> {
        self.keys
            .binary_search_by(|k| k.as_slice().cmp(key))
            .ok()
            .map(|i| self.values[i])
    }

    /// Check membership by exact match.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u64)> + '_ {
        self.keys
            .iter()
            .map(Vec::as_slice)
            .zip(self.values.iter().copied())
    }
}

/// One assembled benchmark input: the corpus plus absent probes split by
/// failure mode.
///
/// All three sequences are sorted. The probe sets are disjoint from each
/// other and contain no corpus member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupFixture {
    /// The prefix-free key set under test.
    pub corpus: Corpus,
    /// Absent probes that extend some corpus key. A prefix table resolves
    /// these to the shadowing key's value; a hash map misses.
    pub prefix_collisions: Vec<Key>,
    /// Absent probes no corpus key is a prefix of. Both structures miss.
    pub clean_misses: Vec<Key>,
}

/// Assemble a fixture from scratch.
///
/// Samples a pool of `target_size + 1` candidate keys and reduces it to a
/// prefix-free corpus, then samples a second batch of the same size for
/// probe material. Probes are deduplicated, stripped of exact corpus
/// members, and partitioned by [`crate::classify`]. Values are drawn last,
/// one per surviving corpus key.
///
/// Heavy prefix filtering can leave the corpus well below `target_size`,
/// even empty; short length bounds make this more likely.
pub fn assemble<R: Rng + ?Sized>(
    rng: &mut R,
    config: &CorpusConfig,
) -> Result<LookupFixture, ConfigError> {
    config.validate()?;

    let pool = sample_keys(
        rng,
        config.min_key_len,
        config.max_key_len,
        config.target_size + 1,
    );
    let keys = prefix_free_subset(pool);

    let mut probes = sample_keys(
        rng,
        config.min_key_len,
        config.max_key_len,
        config.target_size + 1,
    );
    probes.sort();
    probes.dedup();
    probes.retain(|probe| keys.binary_search(probe).is_err());

    // partition_probes keeps the sorted order in both halves.
    let (prefix_collisions, clean_misses) = partition_probes(&keys, probes);

    let values = keys.iter().map(|_| sample_value(rng)).collect();

    Ok(LookupFixture {
        corpus: Corpus { keys, values },
        prefix_collisions,
        clean_misses,
    })
}
