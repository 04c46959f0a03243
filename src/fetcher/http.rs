use std::time::Duration;

use anyhow::Context;
use reqwest::Client;

use crate::{
    config::FetcherConfig,
    schema::TokenAttributes,
    util,
};

use super::adapter::TokenFetcher;

/// HTTP metadata fetcher
///
/// Requests `GET {base_url}/{collection}/{id}.json` and decodes the
/// body as a flat JSON object of trait name → trait value.
///
/// FAILURES:
/// - Transport errors
/// - Non-2xx status codes
/// - Bodies that are not a string → string object
///
/// All of them surface as `anyhow::Error`; the worker decides
/// whether to retry.
pub struct HttpTokenFetcher {
    client: Client,
    base_url: String,
}

impl HttpTokenFetcher {
    pub fn new(config: &FetcherConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl TokenFetcher for HttpTokenFetcher {

    async fn fetch(
        &self,
        id: u32,
        collection: &str,
    ) -> anyhow::Result<TokenAttributes> {
        let url = util::token_url(&self.base_url, collection, id);

        let res = self.client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()?;

        let attrs = res
            .json::<TokenAttributes>()
            .await
            .with_context(|| format!("malformed metadata for token {}", id))?;

        Ok(attrs)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::{Method::GET, MockServer};

    use super::*;

    fn fetcher_for(server: &MockServer) -> HttpTokenFetcher {
        HttpTokenFetcher::new(&FetcherConfig {
            base_url: server.base_url(),
            timeout_secs: Some(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/test/1.json");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"hat":"green beret","earring":"gold"}"#);
            })
            .await;

        let attrs = fetcher_for(&server).fetch(1, "test").await.unwrap();

        mock.assert_async().await;
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["hat"], "green beret");
        assert_eq!(attrs["earring"], "gold");
    }

    #[tokio::test]
    async fn test_fetch_empty_object_is_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/test/2.json");
                then.status(200).body("{}");
            })
            .await;

        let attrs = fetcher_for(&server).fetch(2, "test").await.unwrap();
        assert!(attrs.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_2xx_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/test/3.json");
                then.status(404).body("not found");
            })
            .await;

        assert!(fetcher_for(&server).fetch(3, "test").await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/test/4.json");
                then.status(200).body(r#"{"hat": ["not", "a", "string"]}"#);
            })
            .await;

        assert!(fetcher_for(&server).fetch(4, "test").await.is_err());
    }
}
