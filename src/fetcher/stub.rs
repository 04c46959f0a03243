//! Test fetchers used across the crate's unit tests.

use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::anyhow;

use crate::schema::TokenAttributes;

use super::adapter::TokenFetcher;

/// Builds an attribute map from `(name, value)` pairs.
pub fn attrs(pairs: &[(&str, &str)]) -> TokenAttributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Delegates to a closure and counts every call.
pub struct FnFetcher<F> {
    f: F,
    calls: AtomicU32,
}

impl<F> FnFetcher<F>
where
    F: Fn(u32, &str) -> anyhow::Result<TokenAttributes> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f, calls: AtomicU32::new(0) }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl<F> TokenFetcher for FnFetcher<F>
where
    F: Fn(u32, &str) -> anyhow::Result<TokenAttributes> + Send + Sync,
{
    async fn fetch(&self, id: u32, collection: &str) -> anyhow::Result<TokenAttributes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.f)(id, collection)
    }
}

/// A fetcher that never succeeds.
pub fn always_failing() -> FnFetcher<impl Fn(u32, &str) -> anyhow::Result<TokenAttributes> + Send + Sync> {
    FnFetcher::new(|_, _| Err(anyhow!("no response")))
}

/// The three-token collection: one gold earring, two silver.
pub fn three_hats() -> FnFetcher<impl Fn(u32, &str) -> anyhow::Result<TokenAttributes> + Send + Sync> {
    FnFetcher::new(|id, _| match id {
        1 => Ok(attrs(&[("hat", "green beret"), ("earring", "gold")])),
        2 | 3 => Ok(attrs(&[("hat", "green beret"), ("earring", "silver")])),
        other => Err(anyhow!("unexpected token id {}", other)),
    })
}
