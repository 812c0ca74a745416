//! Search orchestration: classify, route, merge.
//!
//! The orchestrator is the sole search entry point for external callers. A
//! query is classified to one source (delegate directly) or to all sources
//! (fan out, merge, re-rank). Sources never block each other: each fan-out
//! query runs against that source's own lock.

use std::sync::Arc;

use crate::classify::{Classification, Classifier};
use crate::document::SearchResult;
use crate::error::SearchError;
use crate::manager::IndexManager;

/// Result limit substituted for a missing or zero caller limit.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Composes the index manager's per-source indices with the classifier.
#[derive(Debug)]
pub struct DocSearch {
    manager: Arc<IndexManager>,
    classifier: Classifier,
    default_limit: usize,
}

impl DocSearch {
    pub fn new(manager: Arc<IndexManager>, classifier: Classifier) -> Self {
        Self::with_default_limit(manager, classifier, DEFAULT_MAX_RESULTS)
    }

    /// Like [`Self::new`] with a configured fallback result limit.
    pub fn with_default_limit(
        manager: Arc<IndexManager>,
        classifier: Classifier,
        default_limit: usize,
    ) -> Self {
        let default_limit = if default_limit == 0 {
            DEFAULT_MAX_RESULTS
        } else {
            default_limit
        };
        Self {
            manager,
            classifier,
            default_limit,
        }
    }

    /// The underlying index manager.
    pub fn manager(&self) -> &Arc<IndexManager> {
        &self.manager
    }

    /// Search with keyword classification deciding the source routing.
    ///
    /// `max_results` of 0 selects the configured default limit.
    pub fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let limit = self.effective_limit(max_results);

        match self.classifier.classify(query) {
            Classification::Source(name) => {
                tracing::debug!(query, source = %name, "query classified to single source");
                self.manager.source(&name)?.search(query, limit)
            }
            Classification::All => {
                tracing::debug!(query, "query classified to all sources");
                self.search_all(query, limit)
            }
        }
    }

    /// Search with an explicit source override, bypassing classification.
    ///
    /// `source` of `None` forces an all-sources search.
    pub fn search_source(
        &self,
        query: &str,
        source: Option<&str>,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let limit = self.effective_limit(max_results);

        match source {
            Some(name) => self.manager.source(name)?.search(query, limit),
            None => self.search_all(query, limit),
        }
    }

    /// Query every source and merge.
    ///
    /// Each source is asked for twice the requested limit so one dominant
    /// source cannot starve the merge. The concatenation follows source
    /// configuration order; the stable score-descending sort therefore
    /// breaks ties by source order, then by each source's own document-ID
    /// ordering. Failing sources are dropped from the merge; the call only
    /// fails when every source fails.
    fn search_all(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        let mut merged: Vec<SearchResult> = Vec::new();
        let mut failures: Vec<String> = Vec::new();
        let mut attempted = 0usize;

        for index in self.manager.sources() {
            attempted += 1;
            match index.search(query, limit * 2) {
                Ok(results) => merged.extend(results),
                Err(e) => {
                    tracing::warn!(source = index.source(), error = %e, "source search failed");
                    failures.push(format!("{}: {e}", index.source()));
                }
            }
        }

        if attempted > 0 && failures.len() == attempted {
            return Err(SearchError::AllSourcesFailed(failures.join("; ")));
        }

        merged.sort_by(|a, b| b.score.total_cmp(&a.score));
        merged.truncate(limit);
        Ok(merged)
    }

    fn effective_limit(&self, max_results: usize) -> usize {
        if max_results == 0 {
            self.default_limit
        } else {
            max_results
        }
    }
}
