//! Configuration management for fieldscope
//!
//! Default config location: ~/.fieldscope/config.toml

use crate::fetcher::ElasticsearchFetcher;
use crate::mapping::MappingLayout;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub elasticsearch: ElasticsearchConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ElasticsearchConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Indices to inspect. Empty means all indices.
    #[serde(default)]
    pub indices: Vec<String>,
    /// Engine version as `major * 10 + minor` (e.g. 56, 60, 70).
    /// Versions before 70 use per-type mappings.
    #[serde(default = "default_es_version")]
    pub es_version: u32,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_es_version() -> u32 {
    70
}

fn default_timeout() -> u64 {
    30000
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            indices: Vec::new(),
            es_version: default_es_version(),
            timeout_ms: default_timeout(),
        }
    }
}

impl ElasticsearchConfig {
    pub fn layout(&self) -> MappingLayout {
        MappingLayout::for_version(self.es_version)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn fetcher(&self) -> Result<ElasticsearchFetcher> {
        let url = url::Url::parse(&self.url)
            .map_err(|e| anyhow!("Invalid elasticsearch.url '{}': {}", self.url, e))?;
        Ok(ElasticsearchFetcher::with_timeout(
            url,
            self.indices.clone(),
            self.timeout(),
        )?)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// refID used when none is given on the command line
    #[serde(default = "default_ref_id")]
    pub ref_id: String,
    /// Default `fieldTypeFilter` (empty = all fields)
    #[serde(default)]
    pub field_type_filter: String,
}

fn default_ref_id() -> String {
    "A".to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            ref_id: default_ref_id(),
            field_type_filter: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter string. Override with RUST_LOG env var
    #[serde(default = "default_level")]
    pub level: String,
    /// Log output format: "pretty" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            file: None,
        }
    }
}

impl Config {
    /// Default config path (~/.fieldscope/config.toml)
    pub fn default_path() -> Result<PathBuf> {
        expand_tilde(Path::new("~/.fieldscope/config.toml"))
    }

    /// Load config from file path, or create default
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.expand_paths()?;
            Ok(config)
        } else {
            let config = Config::default();
            // Try to save default config
            if let Some(parent) = config_path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = config.save(config_path);
            Ok(config)
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    fn expand_paths(&mut self) -> Result<()> {
        if let Some(ref f) = self.logging.file {
            self.logging.file = Some(expand_tilde(f)?);
        }
        Ok(())
    }
}

/// Expand ~ to home directory in path
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))?;
        Ok(home.join(rest))
    } else if s == "~" {
        dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))
    } else {
        Ok(path.to_path_buf())
    }
}
