//! Configuration for the harvester.
//!
//! Loaded from a TOML file, then overridden from the environment.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default GraphQL endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://x.com/i/api/graphql";

/// Bearer token of the public web client.
pub const DEFAULT_BEARER_TOKEN: &str = "AAAAAAAAAAAAAAAAAAAAANRILgAAAAAAnNwIzUejRCOuH5E6I8xnZz4puTs%3D1Zv7ttfk8LF81IUq16cHjhLTvJu4FA33AGWWjCpTnA";

/// Default number of entries requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "harvest.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
}

/// GraphQL API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint base, without trailing slash.
    pub base_url: String,
    pub bearer_token: String,
    /// Entries requested per timeline page.
    pub page_size: u32,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Operation name to GraphQL query id. Query ids rotate with platform
    /// deploys, so they are configuration rather than constants.
    pub operations: BTreeMap<String, String>,
    /// Feature flags sent with every request.
    pub features: BTreeMap<String, bool>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bearer_token: DEFAULT_BEARER_TOKEN.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            operations: BTreeMap::new(),
            features: BTreeMap::new(),
        }
    }
}

impl ApiConfig {
    /// Query id configured for an operation.
    pub fn query_id(&self, operation: &str) -> Result<&str> {
        self.operations
            .get(operation)
            .map(String::as_str)
            .ok_or_else(|| {
                Error::Config(format!(
                    "no query id configured for operation {operation} (set api.operations.{operation})"
                ))
            })
    }
}

/// Where session cookies come from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session JSON file.
    pub path: Option<PathBuf>,
    /// Captured HTTP request containing a `Cookie:` header.
    pub request_file: Option<PathBuf>,
}

impl HarvestConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// Load from an explicit path, or from `harvest.toml` if present, or
    /// fall back to defaults. Environment overrides are applied last.
    ///
    /// # Environment Variables
    /// - `HARVEST_API_BASE_URL`: endpoint base
    /// - `HARVEST_PAGE_SIZE`: entries per page
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var("HARVEST_API_BASE_URL") {
            self.api.base_url = base_url;
        }
        if let Some(page_size) = std::env::var("HARVEST_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.api.page_size = page_size;
        }
    }
}
