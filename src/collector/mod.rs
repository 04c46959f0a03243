/// Collector module
///
/// This module groups all logic responsible for the fetch phase:
/// - Spawning the worker pool
/// - Publishing one job per token id
/// - Retrying failed downloads
/// - Waiting for every worker before results are read
///
/// The collector layer sits between:
/// - The TokenFetcher (transport)
/// - The rarity pipeline (aggregation / scoring / ranking)
///
/// Design notes:
/// - Transport-specific logic MUST NOT live here
/// - No aggregation happens here; results are handed over only
///   after the completion barrier
pub mod runner;
