//! HTTP client for Printful's `GET /store/products` endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use storefront_core::Product;

use crate::error::CatalogError;
use crate::normalize::normalize_catalog;
use crate::types::{PrintfulProduct, PrintfulProductsResponse};

const DEFAULT_BASE_URL: &str = "https://api.printful.com/";

/// HTTP client for the Printful store catalog.
///
/// Makes exactly one request per call with no retries and no pagination:
/// any non-2xx status is a [`CatalogError::UpstreamStatus`] carrying the
/// status reason, and network failures surface as [`CatalogError::Http`].
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct PrintfulClient {
    client: Client,
    base_url: Url,
}

impl PrintfulClient {
    /// Creates a client pointed at the production Printful API.
    ///
    /// `timeout_secs` of `None` keeps the transport default (no timeout).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: Option<u64>, user_agent: &str) -> Result<Self, CatalogError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`CatalogError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Full URL of the store products listing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if the path cannot be joined
    /// onto the base URL (e.g. a `data:` base).
    pub fn store_products_url(&self) -> Result<Url, CatalogError> {
        self.base_url
            .join("store/products")
            .map_err(|e| CatalogError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fetches the raw store product list using `api_key` as bearer token.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UpstreamStatus`]: any non-2xx status.
    /// - [`CatalogError::Http`]: network or TLS failure.
    /// - [`CatalogError::Deserialize`]: body is not the expected envelope.
    pub async fn fetch_store_products(
        &self,
        api_key: &str,
    ) -> Result<Vec<PrintfulProduct>, CatalogError> {
        let url = self.store_products_url()?;

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_owned();
            tracing::warn!(status = status.as_u16(), %url, "Printful returned non-success status");
            return Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<PrintfulProductsResponse>(&body).map_err(|e| {
            CatalogError::Deserialize {
                context: format!("store products from {url}"),
                source: e,
            }
        })?;

        tracing::debug!(count = parsed.result.len(), "fetched Printful store products");
        Ok(parsed.result)
    }

    /// Fetches the store catalog and maps it into storefront products.
    ///
    /// # Errors
    ///
    /// Propagates every error of [`Self::fetch_store_products`] and
    /// [`normalize_catalog`]; no partial list is ever returned.
    pub async fn fetch_catalog(&self, api_key: &str) -> Result<Vec<Product>, CatalogError> {
        let raw = self.fetch_store_products(api_key).await?;
        let products = normalize_catalog(raw)?;
        tracing::info!(count = products.len(), "normalized Printful catalog");
        Ok(products)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
