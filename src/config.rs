use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::schema::Collection;

/// Default metadata host serving `<collection>/<id>.json` documents.
pub const DEFAULT_BASE_URL: &str = "https://go-challenge.skip.money";

/// Max number of workers downloading token metadata in parallel.
pub const MAX_WORKERS: usize = 250;

/// Max number of retries after the first failed download of a token.
pub const MAX_RETRY: u32 = 3;

/// Number of ranked tokens printed by default.
pub const DEFAULT_TOP_K: usize = 5;

// ------------------------------------------------------------
// Root configuration
// ------------------------------------------------------------
//
// Top-level structure loaded from `config.json`.
//
// Every section is optional; omitted sections and fields fall
// back to the built-in defaults (the azuki collection).
//
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// Which collection to rank
    pub collection: CollectionConfig,

    /// Metadata transport settings
    pub fetcher: FetcherConfig,

    /// Worker pool and retry settings
    pub pipeline: PipelineConfig,

    /// How the ranking is printed
    pub output: OutputConfig,

    /// Optional debug configuration
    pub debug: Option<DebugConfig>,
}

// ------------------------------------------------------------
// Collection configuration
// ------------------------------------------------------------
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CollectionConfig {
    /// Collection path segment on the metadata host (e.g. "azuki1")
    pub url: String,

    /// Number of tokens, numbered 1..=count
    pub count: u32,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            url: "azuki1".to_string(),
            count: 10_000,
        }
    }
}

impl CollectionConfig {
    pub fn to_collection(&self) -> Collection {
        Collection {
            count: self.count,
            url: self.url.clone(),
        }
    }
}

// ------------------------------------------------------------
// Fetcher configuration
// ------------------------------------------------------------
//
// NOTES:
// - `timeout_secs = None` keeps the HTTP client's own default.
// - No auth or rate limiting is configured here on purpose.
//
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FetcherConfig {
    /// Scheme + host of the metadata service, without trailing slash
    pub base_url: String,

    /// Optional per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

// ------------------------------------------------------------
// Pipeline configuration
// ------------------------------------------------------------
//
// Controls the fetch phase of the pipeline.
//
// IMPORTANT:
// - `workers` must be at least 1, otherwise the job queue is
//   never drained and the dispatcher blocks forever.
//
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    /// Size of the worker pool
    pub workers: usize,

    /// Extra attempts after the first failure (total = 1 + max_retry)
    pub max_retry: u32,

    /// Keep tokens whose metadata was fetched but carries no
    /// attributes. They score 0.0 and sink to the bottom.
    pub keep_attributeless: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: MAX_WORKERS,
            max_retry: MAX_RETRY,
            keep_attributeless: false,
        }
    }
}

// ------------------------------------------------------------
// Output configuration
// ------------------------------------------------------------
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// Number of top-ranked tokens to print
    pub top_k: usize,

    /// Print the full ranking as a JSON array as well
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            json: false,
        }
    }
}

// ------------------------------------------------------------
// Debug configuration
// ------------------------------------------------------------
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    /// Raises the default log level to `debug`
    pub log: Option<bool>,
}

impl Config {
    pub fn debug_log(&self) -> bool {
        self.debug
            .as_ref()
            .map_or(false, |d| d.log.unwrap_or(false))
    }

    /// Rejects configurations the pipeline cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.pipeline.workers == 0 {
            bail!("pipeline.workers must be at least 1");
        }
        if self.collection.url.trim().is_empty() {
            bail!("collection.url must not be empty");
        }
        Ok(())
    }
}

// ------------------------------------------------------------
// Configuration loader
// ------------------------------------------------------------
//
// Reads a JSON configuration file and deserializes it into
// `Config`. A missing file is not an error: the defaults are
// used instead.
//
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let cfg: Config = if path.exists() {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse {}", path.display()))?
    } else {
        Config::default()
    };

    cfg.validate()?;
    Ok(cfg)
}
