//! Builder-style configuration for indexing and searching transcripts.

use serde::{Deserialize, Serialize};
use tantivy::tokenizer::Language;

use crate::constants::{DEFAULT_BM25_B, DEFAULT_BM25_K1, DEFAULT_CONTEXT_WIDTH};
use crate::{Result, TranscriptSeekError};

fn default_context_width() -> usize {
    DEFAULT_CONTEXT_WIDTH
}

fn default_bm25_k1() -> f32 {
    DEFAULT_BM25_K1
}

fn default_bm25_b() -> f32 {
    DEFAULT_BM25_B
}

/// Language of the single stemmer applied at index and query time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum StemLanguage {
    Danish,
    Dutch,
    #[default]
    English,
    Finnish,
    French,
    German,
    Italian,
    Norwegian,
    Portuguese,
    Russian,
    Spanish,
    Swedish,
}

impl StemLanguage {
    pub(crate) fn tantivy(self) -> Language {
        match self {
            Self::Danish => Language::Danish,
            Self::Dutch => Language::Dutch,
            Self::English => Language::English,
            Self::Finnish => Language::Finnish,
            Self::French => Language::French,
            Self::German => Language::German,
            Self::Italian => Language::Italian,
            Self::Norwegian => Language::Norwegian,
            Self::Portuguese => Language::Portuguese,
            Self::Russian => Language::Russian,
            Self::Spanish => Language::Spanish,
            Self::Swedish => Language::Swedish,
        }
    }
}

/// Tunable search behaviour. Every field has a serde default, so a partial JSON
/// document (or `{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Words of context on each side of a match (`K`).
    #[serde(default = "default_context_width")]
    pub context_width: usize,
    #[serde(default)]
    pub language: StemLanguage,
    /// Drop the language's stop words at index and query time.
    /// Off by default so every occurrence of every word stays searchable.
    #[serde(default)]
    pub stop_words: bool,
    #[serde(default = "default_bm25_k1")]
    pub bm25_k1: f32,
    #[serde(default = "default_bm25_b")]
    pub bm25_b: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            context_width: default_context_width(),
            language: StemLanguage::default(),
            stop_words: false,
            bm25_k1: default_bm25_k1(),
            bm25_b: default_bm25_b(),
        }
    }
}

impl SearchConfig {
    /// Start a fluent builder for `SearchConfig`.
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.context_width == 0 {
            return Err(TranscriptSeekError::InvalidConfig {
                reason: "context_width must be at least 1".into(),
            });
        }
        if !self.bm25_k1.is_finite() || self.bm25_k1 < 0.0 {
            return Err(TranscriptSeekError::InvalidConfig {
                reason: format!("bm25_k1 must be a non-negative number, got {}", self.bm25_k1),
            });
        }
        if !self.bm25_b.is_finite() || !(0.0..=1.0).contains(&self.bm25_b) {
            return Err(TranscriptSeekError::InvalidConfig {
                reason: format!("bm25_b must lie in [0, 1], got {}", self.bm25_b),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    inner: SearchConfig,
}

impl SearchConfigBuilder {
    #[must_use]
    pub fn context_width(mut self, width: usize) -> Self {
        self.inner.context_width = width;
        self
    }

    #[must_use]
    pub fn language(mut self, language: StemLanguage) -> Self {
        self.inner.language = language;
        self
    }

    #[must_use]
    pub fn stop_words(mut self, enabled: bool) -> Self {
        self.inner.stop_words = enabled;
        self
    }

    #[must_use]
    pub fn bm25(mut self, k1: f32, b: f32) -> Self {
        self.inner.bm25_k1 = k1;
        self.inner.bm25_b = b;
        self
    }

    /// Finish the builder, rejecting out-of-range values.
    pub fn build(self) -> Result<SearchConfig> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config = SearchConfig::from_json("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.context_width, 3);
        assert_eq!(config.language, StemLanguage::English);
        assert!(!config.stop_words);
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config =
            SearchConfig::from_json(r#"{"context_width": 5, "language": "german"}"#).unwrap();
        assert_eq!(config.context_width, 5);
        assert_eq!(config.language, StemLanguage::German);
        assert_eq!(config.bm25_k1, DEFAULT_BM25_K1);
    }

    #[test]
    fn zero_context_width_is_rejected() {
        let err = SearchConfig::builder().context_width(0).build().unwrap_err();
        assert!(matches!(err, TranscriptSeekError::InvalidConfig { .. }));
    }

    #[test]
    fn out_of_range_bm25_is_rejected() {
        assert!(SearchConfig::builder().bm25(1.2, 1.5).build().is_err());
        assert!(SearchConfig::builder().bm25(f32::NAN, 0.5).build().is_err());
        assert!(SearchConfig::builder().bm25(0.0, 0.0).build().is_ok());
    }

    #[test]
    fn malformed_json_surfaces_json_error() {
        let err = SearchConfig::from_json("{context_width:").unwrap_err();
        assert!(matches!(err, TranscriptSeekError::Json(_)));
    }
}
