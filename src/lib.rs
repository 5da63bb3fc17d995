#![deny(clippy::all, clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![cfg_attr(
    test,
    allow(
        clippy::useless_vec,
        clippy::uninlined_format_args,
        clippy::float_cmp,
        clippy::cast_precision_loss
    )
)]
#![allow(clippy::module_name_repetitions)]
//
// Documentation lints: internal helpers are self-describing; public APIs carry docs.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
//
// Counts and positions are bounded by transcript sizes; scores are f32 by design of BM25.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
//
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::len_without_is_empty)]

//! Search a collection of time-coded transcripts and jump playback to a match.
//!
//! [`TranscriptSearch`] owns the active index snapshot. Feed it the full
//! transcript collection whenever it changes, then query it with a phrase:
//!
//! ```
//! use transcript_seek::{Transcript, TranscriptSearch};
//!
//! let search = TranscriptSearch::default();
//! search.rebuild(vec![Transcript::from_text_evenly_spaced(
//!     "memo-1",
//!     "the quick brown fox jumps over the lazy dog",
//!     350,
//! )])?;
//!
//! let response = search.search("fox");
//! assert_eq!(response.entries[0].excerpt, "the quick brown fox jumps over the");
//! assert_eq!(response.entries[0].start_play_index, 0);
//! # Ok::<(), transcript_seek::TranscriptSeekError>(())
//! ```

/// The transcript-seek crate version (matches `Cargo.toml`).
pub const TRANSCRIPT_SEEK_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod constants;
pub mod engine;
pub mod error;
pub mod excerpt;
pub mod lex;
pub mod playback;
pub mod search;
pub mod text;
pub mod types;

pub use constants::*;
pub use engine::{PendingSnapshot, RebuildOutcome, RebuildTicket, TranscriptSearch};
pub use error::{Result, TranscriptSeekError};
pub use excerpt::{ExcerptBuilder, ExcerptWindow};
pub use lex::{LexIndex, LexIndexBuilder, PositionList, Postings};
pub use playback::{SeekTarget, format_play_time};
pub use text::TermAnalyzer;
pub use types::{
    MatchedTerm, RawMatch, ResultEntry, SearchConfig, SearchConfigBuilder, SearchResponse,
    SearchWarning, StemLanguage, TimedWord, Transcript, TranscriptId,
};
