//! Helpers for the playback side: where to seek and how to show durations.

use serde::{Deserialize, Serialize};

use crate::constants::MILLIS_PER_SECOND;
use crate::types::{ResultEntry, TranscriptId};

/// Where a player should jump when a result is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekTarget {
    pub transcript_id: TranscriptId,
    pub word_index: usize,
    pub offset_ms: u64,
}

impl SeekTarget {
    #[must_use]
    pub fn from_entry(entry: &ResultEntry) -> Self {
        Self {
            transcript_id: entry.transcript_id.clone(),
            word_index: entry.start_play_index,
            offset_ms: entry.start_offset_ms,
        }
    }

    /// Offset in seconds, the unit media elements seek in.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.offset_ms as f64 / MILLIS_PER_SECOND
    }
}

impl From<&ResultEntry> for SeekTarget {
    fn from(entry: &ResultEntry) -> Self {
        Self::from_entry(entry)
    }
}

/// Render a recording length as `hh:mm:ss`. Hours are not wrapped.
#[must_use]
pub fn format_play_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
