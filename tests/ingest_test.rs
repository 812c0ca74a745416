mod common;

use assert2::check;
use common::corpus_classifier;
use nats_docs_mcp::cache::DocCache;
use nats_docs_mcp::fetch::parse_markdown;
use nats_docs_mcp::{DocSearch, IndexManager};
use std::sync::Arc;

const JETSTREAM_PAGE: &str = "\
# JetStream

JetStream is the built-in persistence engine.

## Streams

Streams consume messages from subjects and store them.

## Consumers

Consumers are stateful views of a stream.
";

/// Parsed markdown flows through the manager into searchable results.
#[test]
fn parsed_pages_are_indexed_and_searchable() {
    let doc = parse_markdown(
        "https://raw.githubusercontent.com/nats-io/nats.docs/master/nats-concepts/jetstream/README.md",
        None,
        JETSTREAM_PAGE,
    );
    check!(doc.title == "JetStream");
    check!(doc.sections.len() == 3);

    let manager = Arc::new(IndexManager::new(["nats"]));
    manager.index_source("nats", vec![doc]).unwrap();
    let search = DocSearch::new(manager, corpus_classifier());

    let results = search.search("jetstream", 10).unwrap();
    check!(results.len() == 1);
    check!(results[0].title == "JetStream");
    check!(results[0].score > 0.0);

    // Section text is part of the searchable text.
    let results = search.search_source("stateful views", Some("nats"), 10).unwrap();
    check!(results.len() == 1);
}

/// Cached batches reload into an identical index.
#[test]
fn cached_batches_rebuild_the_same_index() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DocCache::new(dir.path(), 24);

    let doc = parse_markdown("https://example.com/jetstream.md", None, JETSTREAM_PAGE);
    cache.store("nats", std::slice::from_ref(&doc));

    let reloaded = cache.load("nats").expect("fresh batch should load");
    check!(reloaded == vec![doc]);

    let manager = Arc::new(IndexManager::new(["nats"]));
    manager.index_source("nats", reloaded).unwrap();
    check!(manager.stats().total == 1);

    let search = DocSearch::new(manager, corpus_classifier());
    check!(!search.search("persistence engine", 10).unwrap().is_empty());
}
