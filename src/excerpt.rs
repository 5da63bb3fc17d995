//! Excerpt windows and seek positions for raw matches.
//!
//! A match at position `p` in a transcript of `n` positions gets up to `K` words
//! of left context. Whatever the left side falls short of `K` near the start of
//! the transcript is added to the right side instead. The right side is clipped
//! at the end of the transcript with no compensation on the left. Playback starts
//! at the first word of the window.

use std::ops::Range;

use crate::constants::DEFAULT_CONTEXT_WIDTH;
use crate::types::{RawMatch, ResultEntry, Transcript};
use crate::{Result, TranscriptSeekError};

/// Contiguous positions shown for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcerptWindow {
    pub start: usize,
    pub end: usize,
    pub matched: usize,
    pub start_play: usize,
}

impl ExcerptWindow {
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcerptBuilder {
    context_width: usize,
}

impl Default for ExcerptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_WIDTH)
    }
}

impl ExcerptBuilder {
    #[must_use]
    pub fn new(context_width: usize) -> Self {
        Self { context_width }
    }

    #[must_use]
    pub fn context_width(&self) -> usize {
        self.context_width
    }

    /// Window around `matched` in a transcript of `len` positions, or `None`
    /// when `matched` is not a position of that transcript.
    #[must_use]
    pub fn window(&self, matched: usize, len: usize) -> Option<ExcerptWindow> {
        if matched >= len {
            return None;
        }
        let k = self.context_width;
        // Left scan over matched-K .. matched-1; indices below zero spill right.
        let start = matched.saturating_sub(k);
        let spill = k - (matched - start);
        let end = matched
            .saturating_add(k)
            .saturating_add(spill)
            .saturating_add(1)
            .min(len);
        Some(ExcerptWindow {
            start,
            end,
            matched,
            start_play: start,
        })
    }

    /// One entry per (stem, position) in `raw`, stems in match order and
    /// positions ascending.
    ///
    /// Fails for the whole transcript when its words array does not line up with
    /// the index position space.
    pub fn build_entries(
        &self,
        raw: &RawMatch,
        transcript: &Transcript,
    ) -> Result<Vec<ResultEntry>> {
        if transcript.id != raw.transcript_id {
            return Err(TranscriptSeekError::UnknownTranscript {
                id: raw.transcript_id.clone(),
            });
        }
        if transcript.words.len() != raw.token_count {
            return Err(TranscriptSeekError::AlignmentMismatch {
                transcript_id: raw.transcript_id.clone(),
                token_count: raw.token_count,
                words_len: transcript.words.len(),
            });
        }

        let integrity = |position: usize| TranscriptSeekError::DataIntegrity {
            transcript_id: raw.transcript_id.clone(),
            position,
            words_len: transcript.words.len(),
        };

        let mut entries = Vec::with_capacity(raw.occurrences());
        for term in &raw.terms {
            for &position in &term.positions {
                let window = self
                    .window(position, raw.token_count)
                    .ok_or_else(|| integrity(position))?;
                let mut words = Vec::with_capacity(window.len());
                for pos in window.range() {
                    let word = transcript.word(pos).ok_or_else(|| integrity(pos))?;
                    words.push(word.text.as_str());
                }
                let start_offset_ms = transcript
                    .word(window.start_play)
                    .ok_or_else(|| integrity(window.start_play))?
                    .start_offset_ms;

                entries.push(ResultEntry {
                    transcript_id: raw.transcript_id.clone(),
                    ordinal: raw.ordinal,
                    stem: term.stem.clone(),
                    matched_position: position,
                    start_play_index: window.start_play,
                    start_offset_ms,
                    excerpt: words.join(" "),
                    window: window.range(),
                });
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;
    use crate::types::{MatchedTerm, TimedWord};

    const PANGRAM: &str = "the quick brown fox jumps over the lazy dog";

    fn pangram() -> Transcript {
        Transcript::from_text_evenly_spaced("p", PANGRAM, 400)
    }

    fn raw(stem: &str, positions: &[usize]) -> RawMatch {
        RawMatch {
            transcript_id: "p".into(),
            ordinal: 0,
            score: 1.0,
            token_count: 9,
            terms: vec![MatchedTerm {
                stem: stem.to_string(),
                positions: positions.iter().copied().collect(),
            }],
        }
    }

    #[test]
    fn window_with_full_left_context() {
        let w = ExcerptBuilder::default().window(3, 9).unwrap();
        assert_eq!(w.range(), 0..7);
        assert_eq!(w.start_play, 0);
    }

    #[test]
    fn near_start_spills_right() {
        let b = ExcerptBuilder::default();
        assert_eq!(b.window(1, 9).unwrap().range(), 0..7);
        assert_eq!(b.window(0, 9).unwrap().range(), 0..7);
        assert_eq!(b.window(0, 9).unwrap().start_play, 0);
        assert_eq!(b.window(2, 9).unwrap().range(), 0..7);
    }

    #[test]
    fn near_end_clips_without_left_extension() {
        let w = ExcerptBuilder::default().window(8, 9).unwrap();
        assert_eq!(w.range(), 5..9);
        assert_eq!(w.start_play, 5);
    }

    #[test]
    fn short_transcripts_clip_both_ways() {
        let b = ExcerptBuilder::default();
        assert_eq!(b.window(0, 1).unwrap().range(), 0..1);
        assert_eq!(b.window(1, 2).unwrap().range(), 0..2);
    }

    #[test]
    fn match_outside_transcript_has_no_window() {
        let b = ExcerptBuilder::default();
        assert_eq!(b.window(10, 5), None);
        assert_eq!(b.window(5, 5), None);
        assert_eq!(b.window(0, 0), None);
    }

    #[test]
    fn len_never_underflows() {
        let w = ExcerptWindow {
            start: 7,
            end: 5,
            matched: 10,
            start_play: 7,
        };
        assert_eq!(w.len(), 0);
        assert!(w.is_empty());
    }

    #[test]
    fn wider_context() {
        let w = ExcerptBuilder::new(5).window(10, 30).unwrap();
        assert_eq!(w.range(), 5..16);
        assert_eq!(w.start_play, 5);
    }

    #[test]
    fn builds_fox_excerpt() {
        let entries = ExcerptBuilder::default()
            .build_entries(&raw("fox", &[3]), &pangram())
            .unwrap();
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.excerpt, "the quick brown fox jumps over the");
        assert_eq!(e.matched_position, 3);
        assert_eq!(e.start_play_index, 0);
        assert_eq!(e.start_offset_ms, 0);
    }

    #[test]
    fn builds_dog_excerpt_and_seek_offset() {
        let entries = ExcerptBuilder::default()
            .build_entries(&raw("dog", &[8]), &pangram())
            .unwrap();
        let e = &entries[0];
        assert_eq!(e.excerpt, "over the lazy dog");
        assert_eq!(e.start_play_index, 5);
        assert_eq!(e.start_offset_ms, 2000);
        assert_eq!(e.window, 5..9);
    }

    #[test]
    fn one_entry_per_occurrence_without_merging() {
        let entries = ExcerptBuilder::default()
            .build_entries(&raw("the", &[0, 6]), &pangram())
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].matched_position, 0);
        assert_eq!(entries[0].excerpt, "the quick brown fox jumps over the");
        assert_eq!(entries[1].matched_position, 6);
        assert_eq!(entries[1].excerpt, "fox jumps over the lazy dog");
        assert_eq!(entries[1].start_play_index, 3);
    }

    #[test]
    fn stems_follow_match_order() {
        let mut m = raw("over", &[5]);
        m.terms.push(MatchedTerm {
            stem: "quick".into(),
            positions: smallvec![1],
        });
        let entries = ExcerptBuilder::default().build_entries(&m, &pangram()).unwrap();
        let stems: Vec<&str> = entries.iter().map(|e| e.stem.as_str()).collect();
        assert_eq!(stems, vec!["over", "quick"]);
    }

    #[test]
    fn transcript_for_another_match_is_rejected() {
        let other = Transcript::from_text_evenly_spaced("q", PANGRAM, 400);
        let err = ExcerptBuilder::default()
            .build_entries(&raw("fox", &[3]), &other)
            .unwrap_err();
        assert!(matches!(
            err,
            TranscriptSeekError::UnknownTranscript { ref id } if id.as_str() == "p"
        ));
        assert!(!err.is_integrity());
    }

    #[test]
    fn short_words_array_is_an_alignment_error() {
        let mut t = pangram();
        t.words.truncate(7);
        let err = ExcerptBuilder::default()
            .build_entries(&raw("dog", &[8]), &t)
            .unwrap_err();
        assert!(matches!(
            err,
            TranscriptSeekError::AlignmentMismatch {
                token_count: 9,
                words_len: 7,
                ..
            }
        ));
        assert!(err.is_integrity());
    }

    #[test]
    fn position_past_the_end_is_a_data_integrity_error() {
        let mut t = pangram();
        t.words.push(TimedWord::new("extra", 3600));
        let mut m = raw("ghost", &[9]);
        m.token_count = 10;
        let last = ExcerptBuilder::default().build_entries(&m, &t).unwrap();
        assert_eq!(last[0].excerpt, "the lazy dog extra");

        let mut m = raw("ghost", &[12]);
        m.token_count = 10;
        let err = ExcerptBuilder::default().build_entries(&m, &t).unwrap_err();
        assert!(matches!(
            err,
            TranscriptSeekError::DataIntegrity { position: 12, .. }
        ));
    }
}
