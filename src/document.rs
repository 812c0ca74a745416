//! Documentation data types shared across indexing and search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A section within a documentation page.
///
/// Sections are owned by their [`Document`] and have no independent identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text, without the markdown `#` markers.
    pub heading: String,
    /// Body text between this heading and the next.
    pub content: String,
    /// Heading level, 1–6.
    pub level: u8,
}

/// A single documentation page supplied by a fetch collaborator.
///
/// IDs are unique within one source's index; re-indexing the same ID replaces
/// the prior version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identity within the owning source's index. Must be non-empty.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Canonical URL of the page.
    pub url: String,
    /// Full page text.
    pub content: String,
    /// Ordered sections of the page.
    pub sections: Vec<Section>,
    /// When the page was fetched or last known to change.
    pub last_updated: DateTime<Utc>,
}

impl Document {
    /// Concatenate title, content, and every section's heading and content
    /// in document order into the text the search index sees.
    pub fn searchable_text(&self) -> String {
        let section_len: usize = self
            .sections
            .iter()
            .map(|s| s.heading.len() + s.content.len() + 2)
            .sum();
        let mut text =
            String::with_capacity(self.title.len() + self.content.len() + section_len + 2);

        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.content);
        for section in &self.sections {
            text.push(' ');
            text.push_str(&section.heading);
            text.push(' ');
            text.push_str(&section.content);
        }
        text
    }
}

/// A read-only search hit projected at query time. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// ID of the matched document within its source.
    pub doc_id: String,
    /// Title of the matched document.
    pub title: String,
    /// URL of the matched document.
    pub url: String,
    /// Bounded excerpt centered on the first query-term occurrence.
    pub snippet: String,
    /// Summed TF-IDF relevance over the query terms.
    pub score: f64,
    /// Name of the source the document came from. Never empty.
    pub source: String,
}
