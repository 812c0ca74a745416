//! Server configuration: documentation sources, keywords, cache settings.
//!
//! Configuration is resolved outside the search core. A TOML file can be
//! supplied via the `NATS_DOCS_MCP_CONFIG` environment variable; otherwise
//! the built-in defaults for the three stock sources are used.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming a TOML config file.
const CONFIG_ENV_VAR: &str = "NATS_DOCS_MCP_CONFIG";

/// Stock source names.
pub const SOURCE_NATS: &str = "nats";
pub const SOURCE_SYNADIA: &str = "synadia";
pub const SOURCE_GITHUB: &str = "github";

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Documentation sources, in priority order. The order is also the
    /// deterministic merge order for all-sources searches.
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,

    /// Disk cache settings for fetched documents.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Result limit substituted when a caller passes none.
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            cache: CacheConfig::default(),
            default_max_results: default_max_results(),
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::from_file(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        if config.sources.is_empty() {
            anyhow::bail!("config file {} defines no sources", path.display());
        }
        Ok(config)
    }

    /// Names of the configured sources, in configuration order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name.clone()).collect()
    }
}

/// One named documentation source.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Registry name, e.g. `nats`.
    pub name: String,
    /// Keywords that route a classified query to this source. Keywords may
    /// be multi-word phrases and may contain hyphens.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Markdown pages to fetch for this source.
    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

/// A single documentation page to fetch.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// URL serving the page as markdown.
    pub url: String,
    /// Title override when the page has no top-level heading.
    #[serde(default)]
    pub title: Option<String>,
}

impl PageConfig {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: None,
        }
    }
}

/// Disk cache settings for fetched document batches.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Whether fetched batches are cached on disk at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Age after which a cached batch is refetched.
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_age_hours: default_max_age_hours(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_age_hours() -> u64 {
    24
}

fn default_max_results() -> usize {
    10
}

fn default_sources() -> Vec<SourceConfig> {
    const NATS_DOCS: &str = "https://raw.githubusercontent.com/nats-io/nats.docs/master";
    const NATS_SERVER: &str = "https://raw.githubusercontent.com/nats-io/nats-server/main";

    vec![
        SourceConfig {
            name: SOURCE_NATS.to_string(),
            keywords: [
                "jetstream",
                "subject",
                "publish",
                "subscribe",
                "request-reply",
                "queue group",
                "key-value",
                "object store",
                "stream",
                "consumer",
                "leafnode",
                "gateway",
                "supercluster",
                "nkeys",
                "jwt",
                "mqtt",
                "websocket",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            pages: vec![
                PageConfig::new(&format!("{NATS_DOCS}/nats-concepts/what-is-nats.md")),
                PageConfig::new(&format!("{NATS_DOCS}/nats-concepts/core-nats.md")),
                PageConfig::new(&format!("{NATS_DOCS}/nats-concepts/jetstream/README.md")),
                PageConfig::new(&format!("{NATS_DOCS}/nats-concepts/subjects.md")),
                PageConfig::new(&format!(
                    "{NATS_DOCS}/running-a-nats-service/configuration/README.md"
                )),
                PageConfig::new(&format!(
                    "{NATS_DOCS}/running-a-nats-service/configuration/securing_nats/README.md"
                )),
            ],
        },
        SourceConfig {
            name: SOURCE_SYNADIA.to_string(),
            keywords: [
                "synadia",
                "control-plane",
                "cloud",
                "ngs",
                "teams",
                "billing",
                "personal access token",
                "dashboard",
                "alert",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            pages: vec![
                PageConfig::new("https://docs.synadia.com/cloud/intro.md"),
                PageConfig::new("https://docs.synadia.com/platform/intro.md"),
                PageConfig::new("https://docs.synadia.com/platform/control-plane/intro.md"),
            ],
        },
        SourceConfig {
            name: SOURCE_GITHUB.to_string(),
            keywords: [
                "github",
                "issue",
                "pull request",
                "release",
                "changelog",
                "source code",
                "repository",
                "contributing",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            pages: vec![
                PageConfig::new(&format!("{NATS_SERVER}/README.md")),
                PageConfig::new(&format!("{NATS_SERVER}/CONTRIBUTING.md")),
                PageConfig::new(&format!("{NATS_SERVER}/SECURITY.md")),
            ],
        },
    ]
}
