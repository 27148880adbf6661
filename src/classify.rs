//! Classification of probe keys against a prefix-free corpus.
//!
//! A prefix table accepts a probe as soon as the bytes of some stored key
//! are exhausted, even if the probe continues past them. An exact-match
//! structure rejects the same probe. Splitting absent probes by that
//! disagreement lets a benchmark measure the two failure paths separately.

use crate::prefix::is_prefix;
use crate::Key;

/// How an absent probe key fails against a prefix table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeKind {
    /// Some corpus key is a prefix of the probe. A prefix table walks that
    /// key to its end and reports a hit; an exact-match structure misses.
    CollidesOnPrefix,
    /// No corpus key is a prefix of the probe. Both structures miss. A probe
    /// that is a strict prefix of a corpus key lands here: the table runs
    /// out of probe bytes before the stored key ends and rejects it.
    CleanMiss,
}

/// Classify one probe against the corpus keys.
///
/// Only the "corpus key is a prefix of the probe" direction matters. The
/// converse direction never produces a spurious hit and is deliberately
/// ignored.
pub fn classify(corpus_keys: &[Key], probe: &[u8]) -> ProbeKind {
    if corpus_keys.iter().any(|key| is_prefix(key, probe)) {
        ProbeKind::CollidesOnPrefix
    } else {
        ProbeKind::CleanMiss
    }
}

/// Split probes into `(collisions, clean_misses)`, preserving input order
/// within each half.
pub fn partition_probes(corpus_keys: &[Key], probes: Vec<Key>) -> (Vec<Key>, Vec<Key>) {
    probes
        .into_iter()
        .partition(|probe| classify(corpus_keys, probe) == ProbeKind::CollidesOnPrefix)
}
