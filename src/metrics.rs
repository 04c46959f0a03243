use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;

/// Global runtime metrics for the fetch phase.
///
/// Purpose:
/// - Track fetch attempts and retries
/// - Track per-token outcomes
///
/// Design:
/// - Lock-free (Atomics)
/// - Cheap to update from every worker
/// - Observability only; no pipeline decision reads these
#[derive(Default)]
pub struct RuntimeMetrics {
    // Attempts
    pub fetch_attempts: AtomicUsize,
    pub fetch_retries: AtomicUsize,

    // Outcomes
    pub tokens_fetched: AtomicUsize,
    pub tokens_failed: AtomicUsize,
    pub tokens_attributeless: AtomicUsize,
}

impl RuntimeMetrics {
    /// One-line summary printed at the end of a run.
    pub fn summary(&self) -> String {
        format!(
            "[METRICS] attempts={} retries={} fetched={} failed={} attributeless={}",
            self.fetch_attempts.load(Ordering::Relaxed),
            self.fetch_retries.load(Ordering::Relaxed),
            self.tokens_fetched.load(Ordering::Relaxed),
            self.tokens_failed.load(Ordering::Relaxed),
            self.tokens_attributeless.load(Ordering::Relaxed),
        )
    }
}

/// Global metrics registry (singleton)
pub static METRICS: Lazy<Arc<RuntimeMetrics>> =
    Lazy::new(|| Arc::new(RuntimeMetrics::default()));
