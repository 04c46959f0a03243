use crate::schema::TokenAttributes;

/// TokenFetcher is the only external boundary of the pipeline.
///
/// Given a token id and the collection path segment, an
/// implementation returns that token's attribute map or fails.
///
/// CONTRACT:
/// - A successful, empty map is a valid answer
/// - Every error is treated the same by callers (retry, then give up)
/// - No timeout or auth is imposed by callers
///
/// THREAD SAFETY:
/// - Must be Send + Sync
/// - One instance is shared by every worker of the pool
///
#[async_trait::async_trait]
pub trait TokenFetcher: Send + Sync {

    /// Fetches the attributes of token `id` in `collection`.
    async fn fetch(
        &self,
        id: u32,
        collection: &str,
    ) -> anyhow::Result<TokenAttributes>;
}
