//! Tokenization and term normalization shared by indexing and querying.
//!
//! Positions are whitespace-delimited tokens, so a transcript's position space
//! lines up 1:1 with a words array split from the same text. Each token is then
//! NFKC-normalized, trimmed of surrounding punctuation, lower-cased, optionally
//! stop-word filtered, and stemmed. A token that normalizes to nothing keeps its
//! position but contributes no stem.

use std::fmt;

use tantivy::tokenizer::{
    LowerCaser, RawTokenizer, Stemmer, StopWordFilter, TextAnalyzer, TokenStream,
};
use unicode_normalization::UnicodeNormalization;

use crate::types::{SearchConfig, StemLanguage};

/// Split text into index positions.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Number of positions `text` occupies in the index.
#[must_use]
pub fn token_count(text: &str) -> usize {
    tokens(text).count()
}

/// NFKC-normalize a token and strip leading/trailing non-alphanumeric characters.
/// Inner punctuation (`don't`, `e-mail`) is kept.
#[must_use]
pub fn normalize_token(token: &str) -> Option<String> {
    let normalized: String = token.nfkc().collect();
    let trimmed = normalized.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Turns raw tokens into stems. Cheap to clone; clone one per thread or query.
#[derive(Clone)]
pub struct TermAnalyzer {
    language: StemLanguage,
    stop_words: bool,
    analyzer: TextAnalyzer,
}

impl fmt::Debug for TermAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermAnalyzer")
            .field("language", &self.language)
            .field("stop_words", &self.stop_words)
            .finish_non_exhaustive()
    }
}

impl TermAnalyzer {
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        let language = config.language.tantivy();
        let base = TextAnalyzer::builder(RawTokenizer::default()).filter(LowerCaser);
        let stop_filter = if config.stop_words {
            let filter = StopWordFilter::new(language);
            if filter.is_none() {
                tracing::debug!(
                    language = ?config.language,
                    "no stop word list for language; stop word filtering disabled"
                );
            }
            filter
        } else {
            None
        };
        let stop_words = stop_filter.is_some();
        let analyzer = match stop_filter {
            Some(filter) => base.filter(filter).filter(Stemmer::new(language)).build(),
            None => base.filter(Stemmer::new(language)).build(),
        };
        Self {
            language: config.language,
            stop_words,
            analyzer,
        }
    }

    /// Stem of a single whitespace token, or `None` when nothing searchable remains.
    pub fn stem(&mut self, token: &str) -> Option<String> {
        let normalized = normalize_token(token)?;
        let mut stream = self.analyzer.token_stream(&normalized);
        let mut stem = None;
        while stream.advance() {
            let text = &stream.token().text;
            if !text.is_empty() {
                stem = Some(text.clone());
            }
        }
        stem
    }

    /// One entry per index position of `text`.
    pub fn analyze_text(&mut self, text: &str) -> Vec<Option<String>> {
        tokens(text).map(|token| self.stem(token)).collect()
    }

    /// Distinct query stems in first-occurrence order.
    pub fn analyze_query(&mut self, phrase: &str) -> Vec<String> {
        let mut stems: Vec<String> = Vec::new();
        for token in tokens(phrase) {
            if let Some(stem) = self.stem(token) {
                if !stems.contains(&stem) {
                    stems.push(stem);
                }
            }
        }
        stems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> TermAnalyzer {
        TermAnalyzer::new(&SearchConfig::default())
    }

    #[test]
    fn normalize_strips_outer_punctuation_only() {
        assert_eq!(normalize_token("\"Hello,\"").as_deref(), Some("Hello"));
        assert_eq!(normalize_token("don't").as_deref(), Some("don't"));
        assert_eq!(normalize_token("--"), None);
        // Fullwidth letters fold under NFKC.
        assert_eq!(normalize_token("ＡＢＣ").as_deref(), Some("ABC"));
    }

    #[test]
    fn stems_are_lowercased_and_stemmed() {
        let mut a = analyzer();
        assert_eq!(a.stem("Jumps").as_deref(), Some("jump"));
        assert_eq!(a.stem("jumping").as_deref(), Some("jump"));
        assert_eq!(a.stem("FOX.").as_deref(), Some("fox"));
    }

    #[test]
    fn every_token_keeps_a_position() {
        let mut a = analyzer();
        let stems = a.analyze_text("well -- the fox");
        assert_eq!(stems.len(), 4);
        assert_eq!(stems[1], None);
        assert_eq!(stems[3].as_deref(), Some("fox"));
    }

    #[test]
    fn query_stems_dedupe_in_order() {
        let mut a = analyzer();
        assert_eq!(a.analyze_query("Fox jumps fox JUMPING"), vec!["fox", "jump"]);
        assert!(a.analyze_query("   \t ").is_empty());
    }

    #[test]
    fn stop_words_are_opt_in() {
        let mut plain = analyzer();
        assert_eq!(plain.stem("the").as_deref(), Some("the"));

        let config = SearchConfig::builder().stop_words(true).build().unwrap();
        let mut filtered = TermAnalyzer::new(&config);
        assert_eq!(filtered.stem("the"), None);
        assert_eq!(filtered.analyze_text("the fox").len(), 2);
    }
}
