//! Public types exposed by the `transcript-seek` crate.

pub mod options;
pub mod search;
pub mod transcript;

pub use options::{SearchConfig, SearchConfigBuilder, StemLanguage};
pub use search::{MatchedTerm, RawMatch, ResultEntry, SearchResponse, SearchWarning};
pub use transcript::{TimedWord, Transcript, TranscriptId};
