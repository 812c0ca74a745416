//! TF-IDF term statistics for one documentation source.

use ahash::AHashMap;

use super::tokenize::tokenize;

/// Term-frequency / document-frequency tables with TF-IDF scoring.
///
/// One instance exists per documentation source. Mutation goes through
/// `&mut self`; concurrent access is mediated by the owning
/// [`DocIndex`](super::doc_index::DocIndex) lock, which guarantees no reader
/// ever observes a partially-applied update.
#[derive(Debug, Default)]
pub struct SearchIndex {
    /// Per-document term occurrence counts, keyed by document ID.
    term_counts: AHashMap<String, AHashMap<String, usize>>,
    /// Number of distinct documents containing each term at least once.
    doc_freq: AHashMap<String, usize>,
    /// Total number of distinct documents ever indexed.
    total_docs: usize,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `text` under `doc_id`, replacing any prior version.
    ///
    /// Re-indexing retracts the old document's contribution to every term's
    /// document frequency before applying the new counts. Skipping the
    /// retract step would silently corrupt document frequency under updates.
    pub fn add_or_replace(&mut self, doc_id: &str, text: &str) {
        if let Some(old_counts) = self.term_counts.remove(doc_id) {
            for term in old_counts.keys() {
                if let Some(freq) = self.doc_freq.get_mut(term) {
                    *freq -= 1;
                    if *freq == 0 {
                        self.doc_freq.remove(term);
                    }
                }
            }
        } else {
            self.total_docs += 1;
        }

        let mut counts: AHashMap<String, usize> = AHashMap::new();
        for token in tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        for term in counts.keys() {
            *self.doc_freq.entry(term.clone()).or_insert(0) += 1;
        }
        self.term_counts.insert(doc_id.to_string(), counts);
    }

    /// Raw occurrence count of `term` in `doc_id`, zero if absent.
    pub fn term_frequency(&self, doc_id: &str, term: &str) -> usize {
        self.term_counts
            .get(doc_id)
            .and_then(|counts| counts.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents in this index containing `term` at least once.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct documents indexed.
    pub fn document_count(&self) -> usize {
        self.total_docs
    }

    /// Number of distinct terms across the whole index.
    pub fn term_count(&self) -> usize {
        self.doc_freq.len()
    }

    /// TF-IDF score of `term` for `doc_id`: `tf * ln(total_docs / df)`.
    ///
    /// Returns 0 when the term is absent from the document or from the index
    /// entirely, guarding the log against an undefined ratio. Natural log,
    /// unsmoothed: a term present in every document contributes 0.
    pub fn score(&self, doc_id: &str, term: &str) -> f64 {
        let tf = self.term_frequency(doc_id, term);
        let df = self.document_frequency(term);
        if tf == 0 || df == 0 {
            return 0.0;
        }

        let idf = (self.total_docs as f64 / df as f64).ln();
        tf as f64 * idf
    }

    /// Summed TF-IDF of `doc_id` over every query token.
    ///
    /// Duplicate query tokens count each time they appear, amplifying
    /// repeated terms.
    pub fn relevance(&self, query: &str, doc_id: &str) -> f64 {
        tokenize(query)
            .iter()
            .map(|term| self.score(doc_id, term))
            .sum()
    }

    /// True when at least one query token occurs in `doc_id`.
    pub fn matches_any(&self, query_tokens: &[String], doc_id: &str) -> bool {
        query_tokens
            .iter()
            .any(|term| self.term_frequency(doc_id, term) > 0)
    }

    /// Drop all term statistics.
    pub fn clear(&mut self) {
        self.term_counts.clear();
        self.doc_freq.clear();
        self.total_docs = 0;
    }
}
