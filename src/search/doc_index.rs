//! Per-source composition of document storage and term statistics.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::document::{Document, SearchResult};
use crate::error::SearchError;

use super::index::SearchIndex;
use super::snippet;
use super::store::DocumentStore;
use super::tokenize::tokenize;

/// One source's index-and-search unit: a [`DocumentStore`] and a
/// [`SearchIndex`] behind a single lock.
///
/// The shared lock is what keeps indexing atomic from a reader's point of
/// view: a search never observes a document whose stored content and term
/// statistics disagree.
#[derive(Debug)]
pub struct DocIndex {
    /// Source name stamped onto every result. Never empty.
    source: String,
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    store: DocumentStore,
    index: SearchIndex,
}

impl DocIndex {
    /// Create an empty index for the named source.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Name of the source this index serves.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Index a document, replacing any prior version with the same ID.
    ///
    /// The searchable text is the title, content, and every section's
    /// heading and content concatenated in document order.
    pub fn index(&self, doc: Document) -> Result<(), SearchError> {
        if doc.id.is_empty() {
            return Err(SearchError::EmptyDocId);
        }

        let text = doc.searchable_text();
        let mut inner = self.write();
        inner.index.add_or_replace(&doc.id, &text);
        inner.store.upsert(doc);
        Ok(())
    }

    /// Search this source's documents.
    ///
    /// A document is a candidate when at least one query token occurs in it;
    /// candidates are ranked by summed TF-IDF, descending, with ties broken
    /// by document ID lexical order so results are deterministic. A `limit`
    /// of 0 means no truncation at this layer.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let tokens = tokenize(query);
        let inner = self.read();

        let mut candidates: Vec<(&Document, f64)> = inner
            .store
            .all()
            .filter(|doc| inner.index.matches_any(&tokens, &doc.id))
            .map(|doc| (doc, inner.index.relevance(query, &doc.id)))
            .collect();

        candidates.sort_by(|(a, sa), (b, sb)| sb.total_cmp(sa).then_with(|| a.id.cmp(&b.id)));
        if limit > 0 {
            candidates.truncate(limit);
        }

        Ok(candidates
            .into_iter()
            .map(|(doc, score)| SearchResult {
                doc_id: doc.id.clone(),
                title: doc.title.clone(),
                url: doc.url.clone(),
                snippet: snippet::generate(&doc.content, &tokens),
                score,
                source: self.source.clone(),
            })
            .collect())
    }

    /// Fetch a stored document by ID.
    pub fn get(&self, id: &str) -> Result<Document, SearchError> {
        self.read().store.get(id).cloned()
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.read().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().store.is_empty()
    }

    /// Discard all documents and term statistics.
    pub fn clear(&self) {
        let mut inner = self.write();
        inner.store.clear();
        inner.index.clear();
    }

    // Lock poisoning only happens if a panic escaped while holding the
    // guard; the inner state is still consistent, so recover the guard.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use chrono::Utc;

    fn doc(id: &str, title: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            url: format!("https://docs.nats.io/{id}"),
            content: content.to_string(),
            sections: vec![],
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn rejects_empty_document_id() {
        let index = DocIndex::new("nats");
        let result = index.index(doc("", "title", "content"));
        check!(result == Err(SearchError::EmptyDocId));
        check!(index.len() == 0);
    }

    #[test]
    fn rejects_empty_query() {
        let index = DocIndex::new("nats");
        check!(index.search("", 10) == Err(SearchError::EmptyQuery));
        check!(index.search("   ", 10) == Err(SearchError::EmptyQuery));
    }

    #[test]
    fn finds_indexed_document_with_positive_score() {
        let index = DocIndex::new("nats");
        index
            .index(doc(
                "d1",
                "JetStream Overview",
                "JetStream is a persistence layer",
            ))
            .unwrap();

        let results = index.search("jetstream", 10).unwrap();
        check!(results.len() == 1);
        check!(results[0].doc_id == "d1");
        check!(results[0].score > 0.0);
        check!(results[0].source == "nats");
    }

    #[test]
    fn title_and_section_text_are_searchable() {
        let index = DocIndex::new("nats");
        let mut d = doc("d1", "Leafnodes", "Extending a cluster.");
        d.sections.push(crate::document::Section {
            heading: "Gateways".to_string(),
            content: "Gateways connect clusters.".to_string(),
            level: 2,
        });
        index.index(d).unwrap();

        check!(index.search("leafnodes", 10).unwrap().len() == 1);
        check!(index.search("gateways", 10).unwrap().len() == 1);
    }

    #[test]
    fn excludes_documents_without_any_query_token() {
        let index = DocIndex::new("nats");
        index.index(doc("d1", "JetStream", "streams")).unwrap();
        index.index(doc("d2", "Security", "auth")).unwrap();

        let results = index.search("jetstream", 10).unwrap();
        check!(results.len() == 1);
        check!(results[0].doc_id == "d1");
    }

    #[test]
    fn scores_are_non_increasing_and_ties_sort_by_id() {
        let index = DocIndex::new("nats");
        index
            .index(doc("b", "streams", "streams streams streams"))
            .unwrap();
        index.index(doc("c", "streams", "other words")).unwrap();
        index.index(doc("a", "streams", "other words")).unwrap();
        index.index(doc("z", "unrelated", "nothing here")).unwrap();

        let results = index.search("streams", 10).unwrap();
        check!(results.len() == 3);
        for pair in results.windows(2) {
            check!(pair[0].score >= pair[1].score);
        }
        // "a" and "c" tie; lexical order decides.
        check!(results[0].doc_id == "b");
        check!(results[1].doc_id == "a");
        check!(results[2].doc_id == "c");
    }

    #[test]
    fn zero_limit_means_no_truncation() {
        let index = DocIndex::new("nats");
        for i in 0..5 {
            index.index(doc(&format!("d{i}"), "subject", "subjects")).unwrap();
        }

        check!(index.search("subject", 0).unwrap().len() == 5);
        check!(index.search("subject", 2).unwrap().len() == 2);
    }

    #[test]
    fn reindexing_replaces_stored_document() {
        let index = DocIndex::new("nats");
        index.index(doc("d1", "Old Title", "old content")).unwrap();
        index.index(doc("d1", "New Title", "new content")).unwrap();

        check!(index.len() == 1);
        check!(index.get("d1").unwrap().title == "New Title");
        check!(index.search("old", 10).unwrap().is_empty());
    }

    #[test]
    fn get_missing_document_is_not_found() {
        let index = DocIndex::new("nats");
        check!(index.get("nope") == Err(SearchError::NotFound("nope".to_string())));
    }
}
