//! Query-scoped result types: raw ranked matches and displayable result entries.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::transcript::TranscriptId;
use crate::lex::PositionList;

/// One matched stem and every position it occupies in a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedTerm {
    pub stem: String,
    pub positions: PositionList,
}

/// Ranked match of a query against one transcript, before windowing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatch {
    pub transcript_id: TranscriptId,
    /// Position of the transcript in the collection the index was built from.
    pub ordinal: usize,
    pub score: f32,
    /// Number of index positions the transcript tokenized into.
    pub token_count: usize,
    /// Matched stems in query order.
    pub terms: Vec<MatchedTerm>,
}

impl RawMatch {
    /// Total occurrences across all matched stems.
    #[must_use]
    pub fn occurrences(&self) -> usize {
        self.terms.iter().map(|t| t.positions.len()).sum()
    }
}

/// A single displayable hit: one occurrence of one stem in one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub transcript_id: TranscriptId,
    pub ordinal: usize,
    pub stem: String,
    pub matched_position: usize,
    /// Position whose start offset playback should seek to.
    pub start_play_index: usize,
    /// `words[start_play_index].start_offset_ms`.
    pub start_offset_ms: u64,
    pub excerpt: String,
    /// Contiguous positions covered by `excerpt`.
    pub window: Range<usize>,
}

/// Non-fatal condition surfaced alongside search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchWarning {
    /// A transcript's matches were skipped because its words and index positions disagree.
    DataIntegrity {
        transcript_id: TranscriptId,
        message: String,
    },
}

impl SearchWarning {
    #[must_use]
    pub fn transcript_id(&self) -> &TranscriptId {
        match self {
            Self::DataIntegrity { transcript_id, .. } => transcript_id,
        }
    }
}

/// Everything a caller needs to render a result list for one phrase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Phrase echoed back for clients.
    pub query: String,
    /// Version of the snapshot the query ran against.
    pub snapshot_version: u64,
    /// Milliseconds spent satisfying the request.
    pub elapsed_ms: u128,
    /// Transcripts that matched at least one term, including skipped ones.
    pub matched_transcripts: usize,
    /// Ranked entries in display order.
    pub entries: Vec<ResultEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SearchWarning>,
}

impl SearchResponse {
    pub(crate) fn empty(query: String, snapshot_version: u64, elapsed_ms: u128) -> Self {
        Self {
            query,
            snapshot_version,
            elapsed_ms,
            matched_transcripts: 0,
            entries: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
