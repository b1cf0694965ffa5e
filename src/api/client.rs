//! PokeAPI Client
//!
//! Cache-first HTTP fetch layer. Every request is keyed by its full URL.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cache::Cache;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// Where a response body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// Served from the response cache without network I/O
    Cache,
    /// Fetched over the network and written into the cache
    Network,
}

/// A raw response body and its origin.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub body: Bytes,
    pub source: FetchSource,
}

/// Client for the PokeAPI with a shared response cache.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    cache: Cache,
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client around an existing HTTP client and cache.
    pub fn new(http: Client, cache: Cache, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            cache,
            base_url,
        }
    }

    /// Creates a client whose requests time out after `timeout`.
    pub fn with_timeout(
        cache: Cache,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(http, cache, base_url))
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Get Resource ==
    /// Returns the body for `url`, from the cache when possible.
    ///
    /// Only successful (2xx) bodies are cached. Error statuses come back as
    /// [`PokedexError::Status`] and leave the cache untouched.
    pub async fn get_resource(&self, url: &str) -> Result<Fetched> {
        if let Some(body) = self.cache.get(url).await {
            debug!(url, "Serving response from cache");
            return Ok(Fetched {
                body,
                source: FetchSource::Cache,
            });
        }

        info!(url, "Fetching from network");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        self.cache.add(url, body.clone()).await;

        Ok(Fetched {
            body,
            source: FetchSource::Network,
        })
    }

    /// Fetches `url` and decodes the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<(T, FetchSource)> {
        let fetched = self.get_resource(url).await?;
        let value = serde_json::from_slice(&fetched.body)?;
        Ok((value, fetched.source))
    }

    // == Typed Endpoints ==
    /// URL of the first location-area page.
    pub fn first_location_page_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    /// Fetches a page of location areas; `None` means the first page.
    pub async fn location_areas(
        &self,
        page_url: Option<&str>,
    ) -> Result<(LocationAreaPage, FetchSource)> {
        match page_url {
            Some(url) => self.get_json(url).await,
            None => self.get_json(&self.first_location_page_url()).await,
        }
    }

    pub async fn location_area(&self, name: &str) -> Result<(LocationArea, FetchSource)> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.get_json(&url).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<(Pokemon, FetchSource)> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> PokeApiClient {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        PokeApiClient::new(Client::new(), cache, base_url)
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_trimmed() {
        let client = client("https://pokeapi.co/api/v2/");
        assert_eq!(client.base_url(), "https://pokeapi.co/api/v2");
        assert_eq!(
            client.first_location_page_url(),
            "https://pokeapi.co/api/v2/location-area/"
        );
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        // Port 9 (discard) is never contacted when the cache answers.
        let client = client("http://127.0.0.1:9/api/v2");
        let url = client.first_location_page_url();
        client
            .cache()
            .add(url.clone(), r#"{"count":0,"next":null,"previous":null,"results":[]}"#)
            .await;

        let (page, source) = client.location_areas(None).await.unwrap();

        assert_eq!(source, FetchSource::Cache);
        assert_eq!(page.count, 0);
    }

    #[tokio::test]
    async fn test_cached_garbage_is_decode_error() {
        let client = client("http://127.0.0.1:9/api/v2");
        client
            .cache()
            .add("http://127.0.0.1:9/api/v2/pokemon/missingno", "not json")
            .await;

        let result = client.pokemon("missingno").await;
        assert!(matches!(result, Err(PokedexError::Decode(_))));
    }
}
