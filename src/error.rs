//! Error handling types and utilities.

/// A specialized Result type for nats-docs-mcp collaborator operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods in the fetch, cache, and config layers.
pub type Result<T> = anyhow::Result<T>;

/// Errors produced by the core indexing and search layer.
///
/// Validation variants are returned before any state mutation, so a rejected
/// operation has no partial effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A search was attempted with an empty query string.
    #[error("search query must not be empty")]
    EmptyQuery,

    /// An indexing call supplied no documents.
    #[error("document batch for source '{0}' is empty")]
    EmptyBatch(String),

    /// A document supplied for indexing had an empty ID.
    #[error("document has an empty id")]
    EmptyDocId,

    /// Lookup of a document ID that is not indexed.
    #[error("document '{0}' not found")]
    NotFound(String),

    /// A source name that is not in the configured registry.
    #[error("unknown documentation source '{0}'")]
    UnknownSource(String),

    /// Every per-source search failed during an all-sources query.
    #[error("all documentation sources failed: {0}")]
    AllSourcesFailed(String),
}
