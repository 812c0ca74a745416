//! Full-text search infrastructure for documentation sources.
//!
//! This module provides TF-IDF based search across fetched documentation,
//! including tokenization, per-source indexing, scoring, and snippets.

// Module declarations
pub(crate) mod doc_index;
pub(crate) mod index;
pub(crate) mod snippet;
pub(crate) mod store;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use doc_index::DocIndex;
pub use index::SearchIndex;
pub use store::DocumentStore;
pub use tokenize::{tokenize, tokenize_compound};
