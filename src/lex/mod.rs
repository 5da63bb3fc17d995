//! Positional inverted index over a transcript collection.
//!
//! A [`LexIndex`] is an immutable snapshot: stem → transcript ordinal → ascending
//! positions. It also owns the transcripts it was built from so excerpts are
//! always cut from the same version of the data that produced the match.

use std::collections::{BTreeMap, HashMap};

use smallvec::SmallVec;

use crate::constants::EMPTY_SNAPSHOT_VERSION;
use crate::text::TermAnalyzer;
use crate::types::{SearchConfig, Transcript, TranscriptId};

mod builder;

pub use builder::LexIndexBuilder;

/// Ascending positions of one stem within one transcript.
pub type PositionList = SmallVec<[usize; 4]>;

/// Postings for one stem, keyed by transcript ordinal.
pub type Postings = BTreeMap<usize, PositionList>;

pub struct LexIndex {
    pub(crate) version: u64,
    pub(crate) fingerprint: blake3::Hash,
    pub(crate) config: SearchConfig,
    pub(crate) analyzer: TermAnalyzer,
    pub(crate) transcripts: Vec<Transcript>,
    pub(crate) ordinals: HashMap<TranscriptId, usize>,
    pub(crate) token_counts: Vec<usize>,
    pub(crate) total_tokens: usize,
    pub(crate) postings: HashMap<String, Postings>,
}

impl std::fmt::Debug for LexIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexIndex")
            .field("version", &self.version)
            .field("fingerprint", &self.fingerprint.to_hex().as_str())
            .field("transcripts", &self.transcripts.len())
            .field("terms", &self.postings.len())
            .finish_non_exhaustive()
    }
}

impl LexIndex {
    /// Snapshot with no transcripts; every query against it is empty.
    #[must_use]
    pub fn empty(config: &SearchConfig) -> Self {
        Self {
            version: EMPTY_SNAPSHOT_VERSION,
            fingerprint: blake3::hash(&[]),
            config: config.clone(),
            analyzer: TermAnalyzer::new(config),
            transcripts: Vec::new(),
            ordinals: HashMap::new(),
            token_counts: Vec::new(),
            total_tokens: 0,
            postings: HashMap::new(),
        }
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Digest of the input collection and analysis settings.
    #[must_use]
    pub fn fingerprint(&self) -> blake3::Hash {
        self.fingerprint
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Analyzer configured exactly like the one that built this index.
    #[must_use]
    pub fn analyzer(&self) -> TermAnalyzer {
        self.analyzer.clone()
    }

    #[must_use]
    pub fn transcript_count(&self) -> usize {
        self.transcripts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }

    /// Number of distinct stems.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    #[must_use]
    pub fn transcripts(&self) -> &[Transcript] {
        &self.transcripts
    }

    #[must_use]
    pub fn transcript(&self, ordinal: usize) -> Option<&Transcript> {
        self.transcripts.get(ordinal)
    }

    #[must_use]
    pub fn transcript_by_id(&self, id: &TranscriptId) -> Option<&Transcript> {
        self.ordinal_of(id).and_then(|ordinal| self.transcript(ordinal))
    }

    #[must_use]
    pub fn ordinal_of(&self, id: &TranscriptId) -> Option<usize> {
        self.ordinals.get(id).copied()
    }

    /// Positions the transcript tokenized into (its index position space).
    #[must_use]
    pub fn token_count(&self, ordinal: usize) -> Option<usize> {
        self.token_counts.get(ordinal).copied()
    }

    pub(crate) fn average_token_count(&self) -> f32 {
        if self.transcripts.is_empty() {
            0.0
        } else {
            self.total_tokens as f32 / self.transcripts.len() as f32
        }
    }

    #[must_use]
    pub fn postings(&self, stem: &str) -> Option<&Postings> {
        self.postings.get(stem)
    }

    /// Positions of `stem` in transcript `id`; empty when either is unknown.
    #[must_use]
    pub fn positions(&self, stem: &str, id: &TranscriptId) -> &[usize] {
        self.ordinal_of(id)
            .and_then(|ordinal| self.postings.get(stem)?.get(&ordinal))
            .map(|positions| positions.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_version_zero() {
        let index = LexIndex::empty(&SearchConfig::default());
        assert_eq!(index.version(), 0);
        assert!(index.is_empty());
        assert_eq!(index.term_count(), 0);
        assert!(index.positions("fox", &TranscriptId::new("x")).is_empty());
    }
}
