use std::collections::HashMap;

use crate::lex::{LexIndex, Postings};
use crate::text::TermAnalyzer;
use crate::types::{SearchConfig, Transcript};
use crate::{Result, TranscriptSeekError};

/// Builds a [`LexIndex`] from an ordered transcript collection.
///
/// Building is deterministic: the same collection and configuration always
/// produce an index with the same fingerprint and the same query results.
#[derive(Debug, Clone)]
pub struct LexIndexBuilder {
    config: SearchConfig,
    version: u64,
}

impl LexIndexBuilder {
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            config: config.clone(),
            version: 1,
        }
    }

    /// Version stamped on the built snapshot.
    #[must_use]
    pub fn version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn build<I>(&self, transcripts: I) -> Result<LexIndex>
    where
        I: IntoIterator<Item = Transcript>,
    {
        let mut analyzer = TermAnalyzer::new(&self.config);
        let mut hasher = blake3::Hasher::new();
        hasher.update(format!("{:?}:{}", self.config.language, self.config.stop_words).as_bytes());

        let mut stored: Vec<Transcript> = Vec::new();
        let mut ordinals = HashMap::new();
        let mut token_counts = Vec::new();
        let mut total_tokens = 0usize;
        let mut postings: HashMap<String, Postings> = HashMap::new();
        let mut misaligned = 0usize;

        for (ordinal, transcript) in transcripts.into_iter().enumerate() {
            if ordinals.insert(transcript.id.clone(), ordinal).is_some() {
                return Err(TranscriptSeekError::DuplicateTranscriptId { id: transcript.id });
            }

            hasher.update(transcript.id.as_str().as_bytes());
            hasher.update(&[0]);
            hasher.update(transcript.text().as_bytes());
            hasher.update(&[0]);
            hasher.update(&(transcript.words.len() as u64).to_le_bytes());

            let stems = analyzer.analyze_text(transcript.text());
            for (position, stem) in stems.iter().enumerate() {
                if let Some(stem) = stem {
                    postings
                        .entry(stem.clone())
                        .or_default()
                        .entry(ordinal)
                        .or_default()
                        .push(position);
                }
            }

            if stems.len() != transcript.words.len() {
                misaligned += 1;
                tracing::warn!(
                    target: "transcript_seek::lex",
                    transcript_id = %transcript.id,
                    token_count = stems.len(),
                    words_len = transcript.words.len(),
                    "transcript text and timed words disagree; its matches will be skipped"
                );
            }

            total_tokens += stems.len();
            token_counts.push(stems.len());
            stored.push(transcript);
        }

        tracing::debug!(
            version = self.version,
            transcripts = stored.len(),
            terms = postings.len(),
            total_tokens,
            misaligned,
            "built lexical snapshot"
        );

        Ok(LexIndex {
            version: self.version,
            fingerprint: hasher.finalize(),
            config: self.config.clone(),
            analyzer,
            transcripts: stored,
            ordinals,
            token_counts,
            total_tokens,
            postings,
        })
    }
}
