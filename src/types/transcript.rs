//! Transcript input types supplied by the storage collaborator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, unique identity of a recording's transcript.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranscriptId(String);

impl TranscriptId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TranscriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TranscriptId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TranscriptId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One spoken token and the moment it starts, in milliseconds from the recording start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedWord {
    pub text: String,
    pub start_offset_ms: u64,
}

impl TimedWord {
    pub fn new<S: Into<String>>(text: S, start_offset_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_offset_ms,
        }
    }
}

/// Immutable transcript of a single recording.
///
/// `words[i]` must describe the same token as index position `i` of `text`
/// (whitespace tokenization). Excerpts and seek offsets are read from `words`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub id: TranscriptId,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub words: Vec<TimedWord>,
}

impl Transcript {
    pub fn new<I, S>(id: I, text: S, words: Vec<TimedWord>) -> Self
    where
        I: Into<TranscriptId>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            text: Some(text.into()),
            words,
        }
    }

    /// Build a transcript whose words array is derived from `text`, one word every
    /// `spacing_ms` milliseconds. Mostly useful for fixtures and demos.
    pub fn from_text_evenly_spaced<I, S>(id: I, text: S, spacing_ms: u64) -> Self
    where
        I: Into<TranscriptId>,
        S: Into<String>,
    {
        let text = text.into();
        let words = text
            .split_whitespace()
            .zip(0u64..)
            .map(|(word, idx)| TimedWord::new(word, idx * spacing_ms))
            .collect();
        Self {
            id: id.into(),
            text: Some(text),
            words,
        }
    }

    /// A recording whose transcription has not produced any text yet.
    pub fn untranscribed<I: Into<TranscriptId>>(id: I) -> Self {
        Self {
            id: id.into(),
            text: None,
            words: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn word(&self, position: usize) -> Option<&TimedWord> {
        self.words.get(position)
    }
}
