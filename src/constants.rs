//! Crate-wide defaults.

/// Words of context captured on each side of a match.
pub const DEFAULT_CONTEXT_WIDTH: usize = 3;

/// BM25 term-frequency saturation.
pub const DEFAULT_BM25_K1: f32 = 1.2;

/// BM25 length normalization.
pub const DEFAULT_BM25_B: f32 = 0.75;

/// Version carried by the empty snapshot a fresh handle starts with.
pub const EMPTY_SNAPSHOT_VERSION: u64 = 0;

/// Conversion factor from word offsets to player seek seconds.
pub const MILLIS_PER_SECOND: f64 = 1000.0;
