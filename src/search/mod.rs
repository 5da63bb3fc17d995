//! Query execution against a single index snapshot.
//!
//! The phrase is analyzed exactly like indexed text. A transcript is a candidate
//! when it contains any query stem (term-level OR). Candidates are ranked by BM25,
//! ties broken by their position in the input collection, and returned with every
//! matched stem's full position list. Windowing is left to the excerpt builder.
//! Invariants: never mutates the snapshot, and an empty phrase yields no matches.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::lex::LexIndex;
use crate::types::{MatchedTerm, RawMatch};

mod scoring;

use scoring::Bm25;

/// Ranked raw matches for `phrase`.
#[must_use]
pub fn search(index: &LexIndex, phrase: &str) -> Vec<RawMatch> {
    let stems = index.analyzer().analyze_query(phrase);
    if stems.is_empty() || index.is_empty() {
        return Vec::new();
    }

    let bm25 = Bm25::for_index(index);
    let mut candidates: BTreeMap<usize, (f32, Vec<MatchedTerm>)> = BTreeMap::new();
    for stem in stems {
        let Some(postings) = index.postings(&stem) else {
            continue;
        };
        let doc_freq = postings.len();
        for (&ordinal, positions) in postings {
            let doc_len = index.token_count(ordinal).unwrap_or(0);
            let entry = candidates.entry(ordinal).or_default();
            entry.0 += bm25.term_score(doc_freq, positions.len(), doc_len);
            entry.1.push(MatchedTerm {
                stem: stem.clone(),
                positions: positions.clone(),
            });
        }
    }

    let mut matches: Vec<RawMatch> = candidates
        .into_iter()
        .filter_map(|(ordinal, (score, terms))| {
            let transcript = index.transcript(ordinal)?;
            Some(RawMatch {
                transcript_id: transcript.id.clone(),
                ordinal,
                score,
                token_count: index.token_count(ordinal).unwrap_or(0),
                terms,
            })
        })
        .collect();
    matches.sort_by(rank_order);
    matches
}

/// Descending score, then ascending input position.
fn rank_order(a: &RawMatch, b: &RawMatch) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.ordinal.cmp(&b.ordinal))
}
