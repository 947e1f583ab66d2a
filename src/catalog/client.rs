use super::types::{Category, Product, ProductPage};
use crate::util::validate_base_url;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Default catalog API.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// How many products the listing page asks for on first load.
pub const DEFAULT_PRODUCT_LIMIT: usize = 100;

const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors from a single catalog request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// Body arrived but was not the JSON shape we expect
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Thin client for the two catalog endpoints the listing page reads.
///
/// Each call is a single GET. There is no retry: a failed request is
/// reported to the caller, which leaves the cache empty.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl CatalogClient {
    /// Build a client for `base_url`.
    ///
    /// The base must be https, except for loopback hosts (local mocks).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let parsed =
            validate_base_url(base_url).map_err(|e| FetchError::InvalidBaseUrl(e.to_string()))?;

        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .build()?;

        let base_url = parsed.as_str().trim_end_matches('/').to_string();
        tracing::debug!(
            base_url = %base_url,
            timeout_secs = timeout.as_secs(),
            "Catalog client ready"
        );

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/products?limit={limit}`
    pub async fn fetch_products(&self, limit: usize) -> Result<Vec<Product>, FetchError> {
        let url = format!("{}/products?limit={}", self.base_url, limit);
        let page: ProductPage = self.get_json(&url).await?;

        tracing::info!(
            count = page.products.len(),
            total = page.total.unwrap_or(page.products.len()),
            "Fetched products"
        );
        Ok(page.products)
    }

    /// `GET {base}/products/categories`
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        let url = format!("{}/products/categories", self.base_url);
        let categories: Vec<Category> = self.get_json(&url).await?;

        tracing::info!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(url = %url, "GET");

        let response = tokio::time::timeout(self.timeout, self.http.get(url).send())
            .await
            .map_err(|_| FetchError::Timeout(self.timeout.as_secs()))??;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let body = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
