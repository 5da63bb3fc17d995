//! BM25 relevance over the positional index.

use crate::lex::LexIndex;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Bm25 {
    k1: f32,
    b: f32,
    doc_count: f32,
    avg_len: f32,
}

impl Bm25 {
    pub(crate) fn for_index(index: &LexIndex) -> Self {
        let config = index.config();
        Self {
            k1: config.bm25_k1,
            b: config.bm25_b,
            doc_count: index.transcript_count() as f32,
            avg_len: index.average_token_count(),
        }
    }

    /// Inverse document frequency; always positive.
    pub(crate) fn idf(&self, doc_freq: usize) -> f32 {
        let df = doc_freq as f32;
        (1.0 + (self.doc_count - df + 0.5) / (df + 0.5)).ln()
    }

    /// Saturated, length-normalized term frequency.
    pub(crate) fn tf(&self, term_freq: usize, doc_len: usize) -> f32 {
        let tf = term_freq as f32;
        let norm = if self.avg_len > 0.0 {
            1.0 - self.b + self.b * (doc_len as f32 / self.avg_len)
        } else {
            1.0
        };
        tf * (self.k1 + 1.0) / (tf + self.k1 * norm)
    }

    pub(crate) fn term_score(&self, doc_freq: usize, term_freq: usize, doc_len: usize) -> f32 {
        self.idf(doc_freq) * self.tf(term_freq, doc_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bm25() -> Bm25 {
        Bm25 {
            k1: 1.2,
            b: 0.75,
            doc_count: 10.0,
            avg_len: 20.0,
        }
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let s = bm25();
        assert!(s.idf(1) > s.idf(5));
        assert!(s.idf(10) > 0.0);
    }

    #[test]
    fn frequency_raises_score_with_saturation() {
        let s = bm25();
        let one = s.tf(1, 20);
        let two = s.tf(2, 20);
        let ten = s.tf(10, 20);
        assert!(two > one);
        assert!(ten > two);
        assert!(ten < s.k1 + 1.0);
    }

    #[test]
    fn longer_documents_are_normalized_down() {
        let s = bm25();
        assert!(s.tf(2, 10) > s.tf(2, 40));
    }
}
