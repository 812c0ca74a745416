pub mod cache;
pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod manager;
pub mod orchestrator;
pub mod search;
pub mod server;
pub mod tracing;

pub use classify::{Classification, Classifier};
pub use config::Config;
pub use document::{Document, SearchResult, Section};
pub use error::SearchError;
pub use manager::{IndexManager, IndexStats};
pub use orchestrator::{DEFAULT_MAX_RESULTS, DocSearch};
pub use search::DocIndex;
