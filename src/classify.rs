//! Keyword-based query classification.
//!
//! The classifier decides which documentation source(s) a free-text query is
//! about, using per-source keyword lists. It is a pure function of the query
//! and the configured keywords; no index state is consulted.

use crate::config::SourceConfig;
use crate::search::tokenize_compound;

/// Outcome of classifying a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Exactly one source's keywords matched.
    Source(String),
    /// Zero or multiple sources matched. Ambiguity and total silence are
    /// treated identically: search everything rather than guess.
    All,
}

/// Per-source keyword lists with whole-word/whole-phrase matching.
///
/// Keywords are matched under the hyphen-continuation tokenization policy,
/// so `control-plane` is a single token: the keyword `control-plane` matches
/// it literally, while the keyword `control` does not match inside it (nor
/// inside `controller`). Multi-word phrase keywords match as a contiguous
/// token sequence.
#[derive(Debug, Clone)]
pub struct Classifier {
    sources: Vec<SourceKeywords>,
}

#[derive(Debug, Clone)]
struct SourceKeywords {
    name: String,
    /// Each keyword pre-tokenized under the compound policy.
    keywords: Vec<Vec<String>>,
}

impl Classifier {
    /// Build a classifier from configured sources.
    pub fn from_sources(sources: &[SourceConfig]) -> Self {
        Self::new(
            sources
                .iter()
                .map(|s| (s.name.clone(), s.keywords.clone())),
        )
    }

    /// Build a classifier from (source name, keyword list) pairs.
    pub fn new<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let sources = sources
            .into_iter()
            .map(|(name, keywords)| SourceKeywords {
                name,
                keywords: keywords
                    .iter()
                    .map(|kw| tokenize_compound(kw))
                    .filter(|tokens| !tokens.is_empty())
                    .collect(),
            })
            .collect();
        Self { sources }
    }

    /// Classify a query to a single source or to all sources.
    ///
    /// Deterministic: identical input always yields identical output.
    pub fn classify(&self, query: &str) -> Classification {
        if query.trim().is_empty() {
            return Classification::All;
        }

        let query_tokens = tokenize_compound(query);
        let mut matched: Option<&str> = None;

        for source in &self.sources {
            let hit = source
                .keywords
                .iter()
                .any(|keyword| contains_sequence(&query_tokens, keyword));
            if hit {
                if matched.is_some() {
                    // Two or more sources matched: ambiguous.
                    return Classification::All;
                }
                matched = Some(&source.name);
            }
        }

        match matched {
            Some(name) => Classification::Source(name.to_string()),
            None => Classification::All,
        }
    }
}

/// True when `needle` occurs as a contiguous subsequence of `haystack`.
fn contains_sequence(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}
