//! Registry of per-source documentation indices.

use std::sync::Arc;

use serde::Serialize;

use crate::document::Document;
use crate::error::SearchError;
use crate::search::DocIndex;

/// Owns one [`DocIndex`] per named source.
///
/// Each source's storage is disjoint, so indexing one source can never touch
/// another source's statistics. The registry itself is fixed at construction;
/// accessors always return the same long-lived index for a given name.
#[derive(Debug)]
pub struct IndexManager {
    indices: Vec<Arc<DocIndex>>,
}

impl IndexManager {
    /// Create a manager with one empty index per source name, preserving
    /// the given order for stats and merge determinism.
    pub fn new<I, S>(source_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            indices: source_names
                .into_iter()
                .map(|name| Arc::new(DocIndex::new(name.into())))
                .collect(),
        }
    }

    /// Look up a source's index by name.
    pub fn source(&self, name: &str) -> Result<&Arc<DocIndex>, SearchError> {
        self.indices
            .iter()
            .find(|index| index.source() == name)
            .ok_or_else(|| SearchError::UnknownSource(name.to_string()))
    }

    /// All per-source indices, in configuration order.
    pub fn sources(&self) -> impl Iterator<Item = &Arc<DocIndex>> {
        self.indices.iter()
    }

    /// Names of the configured sources, in configuration order.
    pub fn source_names(&self) -> Vec<String> {
        self.indices
            .iter()
            .map(|index| index.source().to_string())
            .collect()
    }

    /// Index a batch of documents into one source.
    ///
    /// The whole batch is validated before any document is indexed: an empty
    /// batch or any empty document ID rejects the call with no partial
    /// effect.
    pub fn index_source(&self, name: &str, docs: Vec<Document>) -> Result<(), SearchError> {
        let index = self.source(name)?;
        if docs.is_empty() {
            return Err(SearchError::EmptyBatch(name.to_string()));
        }
        if docs.iter().any(|doc| doc.id.is_empty()) {
            return Err(SearchError::EmptyDocId);
        }

        let count = docs.len();
        for doc in docs {
            index.index(doc)?;
        }
        tracing::debug!(source = name, documents = count, "indexed document batch");
        Ok(())
    }

    /// Snapshot of per-source document counts and their sum.
    pub fn stats(&self) -> IndexStats {
        let sources: Vec<SourceStats> = self
            .indices
            .iter()
            .map(|index| SourceStats {
                name: index.source().to_string(),
                documents: index.len(),
            })
            .collect();
        let total = sources.iter().map(|s| s.documents).sum();
        IndexStats { sources, total }
    }

    /// Discard every source's documents and term statistics.
    ///
    /// Index instances stay alive, so handles returned by [`Self::source`]
    /// remain valid across a reset.
    pub fn reset(&self) {
        for index in &self.indices {
            index.clear();
        }
        tracing::info!("reset all documentation indices");
    }
}

/// Aggregate document counts across all sources.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub sources: Vec<SourceStats>,
    pub total: usize,
}

/// Document count for one source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStats {
    pub name: String,
    pub documents: usize,
}
