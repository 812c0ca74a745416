//! MCP server implementation and shared application state.

use crate::cache::DocCache;
use crate::classify::Classifier;
use crate::config::Config;
use crate::document::{Document, SearchResult};
use crate::fetch::Fetcher;
use crate::manager::IndexManager;
use crate::orchestrator::DocSearch;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// Shared state behind the MCP tools: configuration, the search
/// orchestrator, and the fetch/cache collaborators.
#[derive(Debug)]
pub struct AppState {
    config: Config,
    search: DocSearch,
    fetcher: Fetcher,
    cache: Option<DocCache>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let manager = Arc::new(IndexManager::new(config.source_names()));
        let classifier = Classifier::from_sources(&config.sources);
        let search =
            DocSearch::with_default_limit(manager, classifier, config.default_max_results);

        let cache = if config.cache.enabled {
            DocCache::default_dir().map(|dir| DocCache::new(dir, config.cache.max_age_hours))
        } else {
            None
        };

        Ok(Self {
            config,
            search,
            fetcher: Fetcher::new()?,
            cache,
        })
    }

    /// The search orchestrator.
    pub fn search(&self) -> &DocSearch {
        &self.search
    }

    /// Load every configured source into its index.
    ///
    /// With `refresh` set, the disk cache is bypassed and all indices are
    /// rebuilt from freshly-fetched documents. Sources that fail to load are
    /// skipped; the call only fails when nothing could be loaded at all.
    pub async fn ingest(&self, refresh: bool) -> anyhow::Result<String> {
        let mut batches: Vec<(String, Vec<Document>)> = Vec::new();
        let mut failures: Vec<String> = Vec::new();

        for source in &self.config.sources {
            if source.pages.is_empty() {
                tracing::debug!(source = %source.name, "source has no pages configured, skipping");
                continue;
            }

            let cached = if refresh {
                None
            } else {
                self.cache.as_ref().and_then(|c| c.load(&source.name))
            };

            let docs = match cached {
                Some(docs) => docs,
                None => match self.fetcher.fetch_source(source).await {
                    Ok(docs) => {
                        if let Some(cache) = &self.cache {
                            cache.store(&source.name, &docs);
                        }
                        docs
                    }
                    Err(e) => {
                        tracing::warn!(source = %source.name, error = %e, "failed to load source");
                        failures.push(format!("{}: {e:#}", source.name));
                        continue;
                    }
                },
            };

            batches.push((source.name.clone(), docs));
        }

        if batches.is_empty() && !failures.is_empty() {
            anyhow::bail!(
                "no documentation source could be loaded: {}",
                failures.join("; ")
            );
        }

        let manager = self.search.manager();
        if refresh {
            manager.reset();
        }
        for (name, docs) in batches {
            manager.index_source(&name, docs)?;
        }

        let stats = manager.stats();
        let mut summary = format!("Indexed {} documents across sources:\n", stats.total);
        for source in &stats.sources {
            summary.push_str(&format!("• {}: {}\n", source.name, source.documents));
        }
        if !failures.is_empty() {
            summary.push_str("\nFailed sources:\n");
            for failure in &failures {
                summary.push_str(&format!("• {failure}\n"));
            }
        }
        Ok(summary)
    }
}

/// Parameters for the search_docs tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchDocsRequest {
    /// Free-text search query
    pub query: String,
    /// Maximum number of results to return (default: 10)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Parameters for the search_source tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchSourceRequest {
    /// Free-text search query
    pub query: String,
    /// Source to search: a configured source name, or "all"
    pub source: String,
    /// Maximum number of results to return (default: 10)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// MCP server for NATS documentation search
#[derive(Clone)]
pub struct DocsServer {
    /// Shared application state (config, indices, fetcher, cache)
    state: Arc<AppState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl DocsServer {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
            tool_router: Self::tool_router(),
        })
    }

    /// Get a reference to the shared application state.
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    #[tool(
        description = "Search NATS ecosystem documentation. The query is classified by keywords to the most relevant source (NATS core docs, Synadia platform docs, or the nats-server repository); ambiguous queries search every source and merge results by relevance."
    )]
    fn search_docs(
        &self,
        Parameters(SearchDocsRequest { query, limit }): Parameters<SearchDocsRequest>,
    ) -> std::result::Result<String, String> {
        let results = self
            .state
            .search()
            .search(&query, limit.unwrap_or(0))
            .map_err(|e| e.to_string())?;
        Ok(format_search_results(&results, &query))
    }

    #[tool(
        description = "Search one specific documentation source, bypassing keyword classification. Pass a configured source name (e.g. 'nats', 'synadia', 'github') or 'all' to search every source."
    )]
    fn search_source(
        &self,
        Parameters(SearchSourceRequest {
            query,
            source,
            limit,
        }): Parameters<SearchSourceRequest>,
    ) -> std::result::Result<String, String> {
        let override_source = if source.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(source.as_str())
        };

        let results = self
            .state
            .search()
            .search_source(&query, override_source, limit.unwrap_or(0))
            .map_err(|e| e.to_string())?;
        Ok(format_search_results(&results, &query))
    }

    #[tool(
        description = "Show per-source document counts and the total number of indexed documents."
    )]
    fn docs_stats(&self) -> std::result::Result<String, String> {
        let stats = self.state.search().manager().stats();
        let mut output = String::from("Indexed documentation:\n\n");
        for source in &stats.sources {
            output.push_str(&format!(
                "• {}: {} documents\n",
                source.name, source.documents
            ));
        }
        output.push_str(&format!("\nTotal: {}", stats.total));
        Ok(output)
    }

    #[tool(
        description = "Refetch all documentation sources, bypassing the disk cache, and rebuild every index."
    )]
    async fn refresh_docs(&self) -> std::result::Result<String, String> {
        self.state.ingest(true).await.map_err(|e| format!("{e:#}"))
    }
}

#[tool_handler]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "nats-docs-mcp: Search across NATS core documentation, the Synadia platform \
                 docs, and the nats-server repository. Use search_docs for general queries \
                 (routing is automatic), search_source to target one source, docs_stats for \
                 index counts, and refresh_docs to refetch everything.",
            )
    }
}

/// Format search results into a readable string output.
fn format_search_results(results: &[SearchResult], query: &str) -> String {
    if results.is_empty() {
        let mut msg = format!("No results found for '{}'.\n\n", query);
        msg.push_str("Search tips:\n");
        msg.push_str("• Try a shorter or more general term\n");
        msg.push_str("• Use product terms like 'jetstream', 'leafnode', 'control-plane'\n");
        msg.push_str("• Use search_source to force a specific source\n");
        return msg;
    }

    let mut output = format!("Search results for '{}':\n\n", query);
    let max_score = results.first().map(|r| r.score).unwrap_or(1.0);

    for (idx, result) in results.iter().enumerate() {
        let relevance = ((result.score / max_score) * 100.0).round() as u8;
        output.push_str(&format!(
            "{}. `{}` [{}] - relevance: {}%\n   {}\n",
            idx + 1,
            result.title,
            result.source,
            relevance,
            result.url
        ));
        if !result.snippet.is_empty() {
            output.push_str(&format!("   {}\n", result.snippet.replace('\n', " ")));
        }
        output.push('\n');
    }

    output
}
