//! `TranscriptSearch` handle: snapshot lifecycle and phrase search.

pub mod lifecycle;
mod search;

pub use lifecycle::{PendingSnapshot, RebuildOutcome, RebuildTicket, TranscriptSearch};
