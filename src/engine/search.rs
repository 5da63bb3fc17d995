//! Phrase search over the active snapshot, producing display-ready entries.
//!
//! Integrity failures are contained per transcript: the affected transcript's
//! entries are dropped and reported as warnings, every other transcript's entries
//! are returned as usual.

use std::time::Instant;

use tracing::instrument;

use crate::engine::TranscriptSearch;
use crate::types::{SearchResponse, SearchWarning};

impl TranscriptSearch {
    /// Search the active snapshot for `phrase`.
    ///
    /// Entries come in rank order; within a transcript, stems follow the phrase
    /// and positions ascend. Every occurrence yields its own entry.
    #[instrument(skip(self), fields(snapshot_version = tracing::field::Empty))]
    pub fn search(&self, phrase: &str) -> SearchResponse {
        let start_time = Instant::now();
        let snapshot = self.snapshot();
        tracing::Span::current().record("snapshot_version", snapshot.version());

        let matches = crate::search::search(&snapshot, phrase);
        if matches.is_empty() {
            return SearchResponse::empty(
                phrase.to_string(),
                snapshot.version(),
                start_time.elapsed().as_millis(),
            );
        }

        let mut entries = Vec::new();
        let mut warnings = Vec::new();
        for raw in &matches {
            let Some(transcript) = snapshot.transcript(raw.ordinal) else {
                continue;
            };
            match self.excerpts.build_entries(raw, transcript) {
                Ok(built) => entries.extend(built),
                Err(err) => {
                    tracing::warn!(
                        target: "transcript_seek::excerpt",
                        transcript_id = %raw.transcript_id,
                        error = %err,
                        "skipping transcript matches"
                    );
                    warnings.push(SearchWarning::DataIntegrity {
                        transcript_id: raw.transcript_id.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            matched_transcripts = matches.len(),
            entries = entries.len(),
            skipped = warnings.len(),
            "search complete"
        );

        SearchResponse {
            query: phrase.to_string(),
            snapshot_version: snapshot.version(),
            elapsed_ms: start_time.elapsed().as_millis(),
            matched_transcripts: matches.len(),
            entries,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::TranscriptSearch;
    use crate::types::{SearchWarning, TimedWord, Transcript};

    #[test]
    fn misaligned_transcript_is_skipped_with_warning() {
        let search = TranscriptSearch::default();
        let mut broken = Transcript::from_text_evenly_spaced("broken", "a fox ran off", 100);
        broken.words.pop();
        let healthy = Transcript::from_text_evenly_spaced("healthy", "one fox", 100);
        search.rebuild(vec![broken, healthy]).unwrap();

        let response = search.search("fox");
        assert_eq!(response.matched_transcripts, 2);
        assert_eq!(response.entries.len(), 1);
        assert_eq!(response.entries[0].transcript_id.as_str(), "healthy");
        assert_eq!(response.warnings.len(), 1);
        assert_eq!(response.warnings[0].transcript_id().as_str(), "broken");
        assert!(matches!(
            response.warnings[0],
            SearchWarning::DataIntegrity { .. }
        ));
    }

    #[test]
    fn entries_carry_seek_offsets() {
        let search = TranscriptSearch::default();
        let words = vec![
            TimedWord::new("hello", 120),
            TimedWord::new("there", 480),
            TimedWord::new("general", 900),
            TimedWord::new("kenobi", 1500),
            TimedWord::new("hello", 2600),
        ];
        search
            .rebuild(vec![Transcript::new(
                "clip",
                "hello there general kenobi hello",
                words,
            )])
            .unwrap();

        let response = search.search("Hello!");
        assert_eq!(response.snapshot_version, 1);
        let offsets: Vec<(usize, usize, u64)> = response
            .entries
            .iter()
            .map(|e| (e.matched_position, e.start_play_index, e.start_offset_ms))
            .collect();
        assert_eq!(offsets, vec![(0, 0, 120), (4, 1, 480)]);
    }

    #[test]
    fn empty_phrase_is_not_an_error() {
        let search = TranscriptSearch::default();
        search
            .rebuild(vec![Transcript::from_text_evenly_spaced("a", "words here", 10)])
            .unwrap();
        let response = search.search("   ");
        assert!(response.is_empty());
        assert!(response.warnings.is_empty());
    }
}
