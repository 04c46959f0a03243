// ------------------------------------------------------------
// Module declarations
// ------------------------------------------------------------
//
// - config:    Configuration structs loaded from JSON
// - schema:    Token, fetch outcome and scorecard types
// - util:      URL and formatting helpers
// - fetcher:   TokenFetcher capability + HTTP implementation
// - collector: Worker pool with retries (fetch phase)
// - rarity:    Frequency table, scoring and ranking
// - pipeline:  End-to-end entry point
// - metrics:   Fetch counters
//
mod config;
mod schema;
mod util;
mod fetcher;
mod collector;
mod rarity;
mod pipeline;
mod metrics;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use config::{load_config, Config};
use fetcher::http::HttpTokenFetcher;
use metrics::METRICS;
use pipeline::rank_collection;

const DEFAULT_CONFIG_PATH: &str = "config.json";

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// Responsibilities:
// - Load configuration (first CLI argument or ./config.json)
// - Initialize logging
// - Rank the configured collection
// - Print the top K tokens
//
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config: Config = load_config(&config_path)?;
    init_logging(&config);

    let collection = config.collection.to_collection();
    let fetcher = Arc::new(HttpTokenFetcher::new(&config.fetcher)?);

    let started = Instant::now();
    let ranking = rank_collection(&collection, fetcher, &config.pipeline).await;
    info!(
        "Ranked {} of {} tokens in {:.1}s",
        ranking.len(),
        collection.count,
        started.elapsed().as_secs_f64()
    );

    if ranking.is_empty() {
        warn!("No token of '{}' could be ranked", collection.url);
    }

    // --------------------------------------------------------
    // Print top K (at most)
    // --------------------------------------------------------
    let top = ranking.top(config.output.top_k);
    println!("Top {} tokens:", top.len());
    for (rank, card) in top.iter().enumerate() {
        println!(
            "#{} id={} rarity={}",
            rank + 1,
            card.id,
            util::format_rarity(card.rarity)
        );
    }

    if config.output.json {
        println!("{}", serde_json::to_string_pretty(ranking.scorecards())?);
    }

    println!("{}", METRICS.summary());

    Ok(())
}

// ------------------------------------------------------------
// Logging
// ------------------------------------------------------------
//
// RUST_LOG always wins; otherwise `info`, or `debug` when
// `debug.log` is enabled in the config.
//
fn init_logging(config: &Config) {
    let default_level = if config.debug_log() { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
