//! # prefixbench
//!
//! Randomized lookup corpora for benchmarking prefix-tolerant lookup
//! structures against exact-match hash maps.
//!
//! A prefix table accepts a probe as soon as some stored key's bytes are
//! exhausted, so it only behaves like a map when no stored key is a prefix
//! of another. This crate samples random byte keys and reduces them to a
//! prefix-free corpus with values attached. Absent probes are then sorted
//! into the two failure modes the asymmetry creates: probes that extend a
//! stored key (the table reports a spurious hit) and probes nothing
//! shadows (both structures miss). The result renders as a C++ translation
//! unit pitting a compile-time prefix table against `std::unordered_map`.
//!
//! ## Example
//!
//! ```rust
//! use prefixbench::{assemble, classify, CorpusConfig, ProbeKind};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let fixture = assemble(&mut rng, &CorpusConfig::default()).unwrap();
//!
//! for probe in &fixture.prefix_collisions {
//!     // A hash map misses these; a prefix table would not.
//!     assert_eq!(fixture.corpus.get(probe), None);
//!     assert_eq!(
//!         classify(&fixture.corpus.keys, probe),
//!         ProbeKind::CollidesOnPrefix
//!     );
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod corpus;
pub mod emit;
pub mod prefix;
pub mod sample;

pub use classify::{classify, partition_probes, ProbeKind};
pub use corpus::{assemble, ConfigError, Corpus, CorpusConfig, LookupFixture};
pub use emit::{cstr_literal, write_unit};
pub use prefix::{is_prefix, prefix_free_subset};
pub use sample::{sample_key, sample_keys, sample_value};

/// A key: a non-empty sequence of bytes from `1..=255`.
pub type Key = Vec<u8>;

/// Sentinel value the emitted lookup wrappers return for an absent key.
/// Corpus values never collide with it.
pub const NOT_FOUND: u64 = u64::MAX;

#[cfg(test)]
mod proptests;
