use std::sync::Arc;
use std::sync::atomic::Ordering;

use futures_util::future::join_all;
use log::{debug, error, info, warn};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::{
    config::PipelineConfig,
    fetcher::adapter::TokenFetcher,
    metrics::METRICS,
    schema::{Collection, FetchOutcome, Token},
};

/// One unit of work: download a single token of a collection.
#[derive(Debug, Clone)]
pub struct FetchJob {
    pub id: u32,
    pub collection: Arc<str>,
}

/// Shared job queue. Workers take turns receiving from it.
type JobQueue = Arc<Mutex<mpsc::Receiver<FetchJob>>>;

/// Downloads the whole collection and returns one outcome per token.
///
/// This function:
/// - Spawns `config.workers` workers sharing one job queue
/// - Publishes ids 1..=count, then closes the queue
/// - Waits until every worker has exited (completion barrier)
/// - Drains the results channel
///
/// GUARANTEES:
/// - Results are read only after the barrier
/// - At most `count` outcomes are returned; exactly `count`
///   unless a worker task panicked
/// - Outcome order is arrival order, not dispatch order
///
pub async fn fetch_collection(
    collection: &Collection,
    fetcher: Arc<dyn TokenFetcher>,
    config: &PipelineConfig,
) -> Vec<FetchOutcome> {
    // Capacity 1: publication is paced by the pool's consumption
    let (job_tx, job_rx) = mpsc::channel::<FetchJob>(1);
    let job_rx: JobQueue = Arc::new(Mutex::new(job_rx));
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<FetchOutcome>();

    let pool_size = config.workers.max(1);
    let workers: Vec<JoinHandle<()>> = (0..pool_size)
        .map(|worker_id| {
            tokio::spawn(run_worker(
                worker_id,
                fetcher.clone(),
                job_rx.clone(),
                result_tx.clone(),
                config.max_retry,
            ))
        })
        .collect();

    // Only workers hold result senders from here on
    drop(result_tx);
    drop(job_rx);

    info!(
        "Fetching {} tokens of '{}' with {} workers",
        collection.count,
        collection.url,
        pool_size
    );

    let collection_url: Arc<str> = Arc::from(collection.url.as_str());
    for id in 1..=collection.count {
        let job = FetchJob {
            id,
            collection: collection_url.clone(),
        };

        // Fails only once every worker is gone
        if job_tx.send(job).await.is_err() {
            error!("All workers exited before token {} was dispatched", id);
            break;
        }
    }

    // Close the queue so idle workers observe end of input
    drop(job_tx);

    // --------------------------------------------------------
    // Completion barrier
    // --------------------------------------------------------
    for (worker_id, joined) in join_all(workers).await.into_iter().enumerate() {
        if let Err(e) = joined {
            error!("Worker {} terminated abnormally: {}", worker_id, e);
        }
    }

    let mut outcomes = Vec::with_capacity(collection.count as usize);
    while let Some(outcome) = result_rx.recv().await {
        outcomes.push(outcome);
    }

    info!("Fetch phase complete: {} results", outcomes.len());
    outcomes
}

/// Pulls jobs until the queue is closed and drained.
///
/// Emits exactly one outcome per job consumed.
async fn run_worker(
    worker_id: usize,
    fetcher: Arc<dyn TokenFetcher>,
    jobs: JobQueue,
    results: mpsc::UnboundedSender<FetchOutcome>,
    max_retry: u32,
) {
    loop {
        // Lock is released before the fetch starts
        let job = jobs.lock().await.recv().await;
        let Some(job) = job else {
            break;
        };

        let outcome = fetch_with_retry(fetcher.as_ref(), &job, max_retry).await;

        if let Err(e) = results.send(outcome) {
            warn!(
                "Worker {} stopping: results channel closed, dropped token {}",
                worker_id,
                e.0.id()
            );
            break;
        }
    }

    debug!("Worker {} exited", worker_id);
}

/// Fetches one token, retrying up to `max_retry` extra times.
///
/// RETRY POLICY:
/// - Every error is retried, no distinction between kinds
/// - No delay between attempts
/// - 1 + max_retry attempts in total, then `FetchOutcome::Failed`
///
pub async fn fetch_with_retry(
    fetcher: &dyn TokenFetcher,
    job: &FetchJob,
    max_retry: u32,
) -> FetchOutcome {
    let mut attempts = 0;

    loop {
        attempts += 1;
        METRICS.fetch_attempts.fetch_add(1, Ordering::Relaxed);
        debug!("Getting token {} (attempt {})", job.id, attempts);

        match fetcher.fetch(job.id, &job.collection).await {
            Ok(attributes) => {
                METRICS.tokens_fetched.fetch_add(1, Ordering::Relaxed);
                if attributes.is_empty() {
                    METRICS.tokens_attributeless.fetch_add(1, Ordering::Relaxed);
                    debug!("Token {} has no attributes", job.id);
                }
                return FetchOutcome::Fetched(Token::new(job.id, attributes));
            }

            Err(e) if attempts <= max_retry => {
                METRICS.fetch_retries.fetch_add(1, Ordering::Relaxed);
                warn!("Error getting token {} (attempt {}): {:#}", job.id, attempts, e);
            }

            Err(e) => {
                METRICS.tokens_failed.fetch_add(1, Ordering::Relaxed);
                error!("Giving up on token {} after {} attempts: {:#}", job.id, attempts, e);
                return FetchOutcome::Failed {
                    id: job.id,
                    attempts,
                };
            }
        }
    }
}
