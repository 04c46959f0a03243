use std::sync::Arc;

use log::info;

use crate::{
    collector::runner::fetch_collection,
    config::PipelineConfig,
    fetcher::adapter::TokenFetcher,
    rarity::{
        frequency::{retain_tokens, FrequencyTable},
        ranker::{rank, Ranking},
        scorer::score_tokens,
    },
    schema::{Collection, RarityScorecard},
};

/// Ranks a whole collection by rarity.
///
/// Phases (strictly sequential):
/// 1. Fetch every token through the worker pool
/// 2. Drop failures, build the frequency table
/// 3. Score each retained token
/// 4. Sort by descending rarity
///
/// Never fails: individual fetch failures only shrink the
/// ranking, and an all-failed run yields an empty one.
pub async fn rank_collection(
    collection: &Collection,
    fetcher: Arc<dyn TokenFetcher>,
    config: &PipelineConfig,
) -> Ranking {
    let outcomes = fetch_collection(collection, fetcher, config).await;

    let tokens = retain_tokens(outcomes, config.keep_attributeless);
    let table = FrequencyTable::build(&tokens);
    if table.is_empty() {
        info!("Nothing to aggregate: no attributes were fetched");
    }
    info!(
        "Aggregated {} tokens over {} attribute names",
        tokens.len(),
        table.len()
    );

    rank(score_tokens(&tokens, &table))
}

/// Returns rarity scorecards for a collection, most rare first.
#[allow(dead_code)]
pub async fn get_rarity_scorecards(
    collection: &Collection,
    fetcher: Arc<dyn TokenFetcher>,
    config: &PipelineConfig,
) -> Vec<RarityScorecard> {
    rank_collection(collection, fetcher, config)
        .await
        .into_scorecards()
}
