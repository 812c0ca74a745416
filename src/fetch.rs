//! Fetching documentation pages and parsing them into documents.
//!
//! The search core never touches the network; this collaborator turns
//! configured page URLs into fully-formed [`Document`] values for the
//! index manager to ingest.

use anyhow::Context;
use chrono::Utc;
use futures::future::join_all;
use std::time::Duration;

use crate::config::{PageConfig, SourceConfig};
use crate::document::{Document, Section};
use crate::error::Result;

const USER_AGENT: &str = concat!("nats-docs-mcp/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP fetcher for markdown documentation pages.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch every page of one source, concurrently.
    ///
    /// Pages that fail to download are logged and skipped; the call only
    /// fails when not a single page could be fetched.
    pub async fn fetch_source(&self, source: &SourceConfig) -> Result<Vec<Document>> {
        let start = std::time::Instant::now();
        let fetches = source.pages.iter().map(|page| self.fetch_page(page));

        let mut docs = Vec::with_capacity(source.pages.len());
        for (page, result) in source.pages.iter().zip(join_all(fetches).await) {
            match result {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    tracing::warn!(source = %source.name, url = %page.url, error = %e, "failed to fetch page");
                }
            }
        }

        if docs.is_empty() && !source.pages.is_empty() {
            anyhow::bail!("no pages could be fetched for source '{}'", source.name);
        }

        tracing::info!(
            source = %source.name,
            pages = docs.len(),
            elapsed = ?start.elapsed(),
            "fetched documentation source"
        );
        Ok(docs)
    }

    async fn fetch_page(&self, page: &PageConfig) -> Result<Document> {
        let body = self
            .client
            .get(&page.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("requesting {}", page.url))?
            .text()
            .await
            .with_context(|| format!("reading body of {}", page.url))?;

        Ok(parse_markdown(&page.url, page.title.as_deref(), &body))
    }
}

/// Parse a markdown page into a [`Document`].
///
/// The document ID is the URL path without its extension. Sections are split
/// on `#`–`######` heading lines; the title is the first level-1 heading,
/// falling back to the configured title, then to the ID.
pub fn parse_markdown(url: &str, configured_title: Option<&str>, body: &str) -> Document {
    let id = doc_id_from_url(url);

    let mut sections: Vec<Section> = Vec::new();
    let mut title: Option<String> = None;

    for line in body.lines() {
        if let Some((level, heading)) = parse_heading(line) {
            if level == 1 && title.is_none() {
                title = Some(heading.to_string());
            }
            sections.push(Section {
                heading: heading.to_string(),
                content: String::new(),
                level,
            });
        } else if let Some(section) = sections.last_mut() {
            if !section.content.is_empty() {
                section.content.push('\n');
            }
            section.content.push_str(line);
        }
    }

    for section in &mut sections {
        let trimmed = section.content.trim();
        if trimmed.len() != section.content.len() {
            section.content = trimmed.to_string();
        }
    }

    let title = title
        .or_else(|| configured_title.map(str::to_string))
        .unwrap_or_else(|| id.clone());

    Document {
        id,
        title,
        url: url.to_string(),
        content: body.to_string(),
        sections,
        last_updated: Utc::now(),
    }
}

/// `### Heading` → `(3, "Heading")`. Levels above 6 are not headings.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = line[hashes..].strip_prefix(' ')?;
    let heading = rest.trim();
    if heading.is_empty() {
        return None;
    }
    Some((hashes as u8, heading))
}

/// URL path (without scheme, host, or markdown extension) used as the
/// document ID, e.g. `nats-concepts/jetstream/README`.
fn doc_id_from_url(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme
        .split_once('/')
        .map_or("", |(_, path)| path)
        .trim_matches('/');

    let path = path.strip_suffix(".md").unwrap_or(path);
    if path.is_empty() {
        without_scheme.trim_matches('/').to_string()
    } else {
        path.to_string()
    }
}
