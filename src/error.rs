//! Error type shared by the indexer, query engine, and excerpt builder.

use thiserror::Error;

use crate::types::TranscriptId;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, TranscriptSeekError>;

#[derive(Debug, Error)]
pub enum TranscriptSeekError {
    /// An excerpt window reached a position with no time-coded word behind it.
    #[error(
        "transcript {transcript_id} has no word at position {position} (words array holds {words_len})"
    )]
    DataIntegrity {
        transcript_id: TranscriptId,
        position: usize,
        words_len: usize,
    },

    /// The indexed token count and the words array disagree for a transcript.
    #[error(
        "transcript {transcript_id} tokenized into {token_count} positions but has {words_len} timed words"
    )]
    AlignmentMismatch {
        transcript_id: TranscriptId,
        token_count: usize,
        words_len: usize,
    },

    #[error("duplicate transcript id {id} in input collection")]
    DuplicateTranscriptId { id: TranscriptId },

    #[error("transcript {id} is not part of the active snapshot")]
    UnknownTranscript { id: TranscriptId },

    #[error("invalid search configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TranscriptSeekError {
    /// True for errors that describe a single broken transcript rather than a broken request.
    #[must_use]
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            Self::DataIntegrity { .. } | Self::AlignmentMismatch { .. }
        )
    }
}
