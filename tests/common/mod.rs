//! Shared test fixtures for integration tests.
//!
//! Fixtures build a small three-source corpus (NATS core docs, Synadia
//! platform docs, nats-server repository docs) entirely in memory, so tests
//! exercise the real manager/classifier/orchestrator stack without any
//! network or disk state.

use chrono::Utc;
use nats_docs_mcp::{Classifier, DocSearch, Document, IndexManager, Section};
use rstest::fixture;
use std::sync::Arc;

/// Build a document with the given identity and body text.
#[allow(dead_code)] // Used by a subset of the integration test crates
pub fn doc(id: &str, title: &str, content: &str) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        url: format!("https://docs.example.com/{id}"),
        content: content.to_string(),
        sections: vec![],
        last_updated: Utc::now(),
    }
}

/// Like [`doc`], with one level-2 section appended.
#[allow(dead_code)] // Used by a subset of the integration test crates
pub fn doc_with_section(id: &str, title: &str, content: &str, heading: &str) -> Document {
    let mut d = doc(id, title, content);
    d.sections.push(Section {
        heading: heading.to_string(),
        content: format!("{heading} details"),
        level: 2,
    });
    d
}

/// The stock source names used across tests, in configuration order.
#[allow(dead_code)] // Used by a subset of the integration test crates
pub const SOURCES: [&str; 3] = ["nats", "synadia", "github"];

/// An index manager pre-loaded with a small corpus in every source.
#[allow(dead_code)] // Used by a subset of the integration test crates
pub fn corpus_manager() -> Arc<IndexManager> {
    let manager = Arc::new(IndexManager::new(SOURCES));

    manager
        .index_source(
            "nats",
            vec![
                doc(
                    "concepts/jetstream",
                    "JetStream Overview",
                    "JetStream is the built-in persistence layer with streams and consumers",
                ),
                doc(
                    "concepts/subjects",
                    "Subjects",
                    "Subject-based addressing with wildcards for publish and subscribe",
                ),
                doc(
                    "running/clustering",
                    "Clustering",
                    "Clusters, superclusters, gateways and leafnodes extend a deployment",
                ),
            ],
        )
        .expect("indexing nats corpus");

    manager
        .index_source(
            "synadia",
            vec![
                doc(
                    "platform/control-plane",
                    "Control Plane",
                    "The control-plane manages accounts, streams and deployments from one dashboard",
                ),
                doc(
                    "cloud/billing",
                    "Billing",
                    "Billing and teams administration for the cloud platform",
                ),
            ],
        )
        .expect("indexing synadia corpus");

    manager
        .index_source(
            "github",
            vec![doc(
                "nats-server/readme",
                "nats-server",
                "Source code, releases and issues for the server repository",
            )],
        )
        .expect("indexing github corpus");

    manager
}

/// The stock classifier keyword lists used across tests.
pub fn corpus_classifier() -> Classifier {
    Classifier::new([
        (
            "nats".to_string(),
            vec![
                "jetstream".to_string(),
                "subject".to_string(),
                "leafnode".to_string(),
            ],
        ),
        (
            "synadia".to_string(),
            vec!["control-plane".to_string(), "billing".to_string()],
        ),
        (
            "github".to_string(),
            vec!["release".to_string(), "pull request".to_string()],
        ),
    ])
}

/// A ready-to-search orchestrator over the stock corpus.
#[allow(dead_code)] // Used by a subset of the integration test crates
#[fixture]
pub fn doc_search() -> DocSearch {
    DocSearch::new(corpus_manager(), corpus_classifier())
}
