//! Keyed storage for documents within one source.

use ahash::AHashMap;

use crate::document::Document;
use crate::error::SearchError;

/// Per-source document storage, keyed by document ID.
///
/// Like [`SearchIndex`](super::index::SearchIndex), thread safety comes from
/// the owning [`DocIndex`](super::doc_index::DocIndex) lock.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: AHashMap<String, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the document with the same ID.
    pub fn upsert(&mut self, doc: Document) {
        self.docs.insert(doc.id.clone(), doc);
    }

    /// Look up a document by ID.
    pub fn get(&self, id: &str) -> Result<&Document, SearchError> {
        self.docs
            .get(id)
            .ok_or_else(|| SearchError::NotFound(id.to_string()))
    }

    /// Iterate all stored documents, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &Document> {
        self.docs.values()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Drop all documents.
    pub fn clear(&mut self) {
        self.docs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use chrono::Utc;

    fn doc(id: &str) -> Document {
        Document {
            id: id.to_string(),
            title: format!("title {id}"),
            url: format!("https://docs.nats.io/{id}"),
            content: "content".to_string(),
            sections: vec![],
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn upsert_replaces_same_id() {
        let mut store = DocumentStore::new();
        store.upsert(doc("a"));
        let mut replacement = doc("a");
        replacement.title = "replaced".to_string();
        store.upsert(replacement);

        check!(store.len() == 1);
        check!(store.get("a").unwrap().title == "replaced");
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = DocumentStore::new();
        check!(store.get("absent") == Err(SearchError::NotFound("absent".to_string())));
    }
}
