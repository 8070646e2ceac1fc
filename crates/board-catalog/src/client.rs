//! HTTP client for the product catalog endpoint.
//!
//! The endpoint returns `{"data": [ ...catalog records ]}`. One fetch at
//! session start seeds the store; there is no polling.

use crate::error::{CatalogError, CatalogResult};
use board_core::CatalogRecord;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

/// Default timeout for the catalog request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Catalog endpoint payload.
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    /// Array of catalog records.
    pub data: Vec<CatalogRecord>,
}

/// Client for the one-shot catalog fetch.
pub struct CatalogClient {
    client: Client,
    catalog_url: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    pub fn new(catalog_url: impl Into<String>) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            catalog_url: catalog_url.into(),
        })
    }

    /// Fetch the product catalog.
    pub async fn fetch_products(&self) -> CatalogResult<Vec<CatalogRecord>> {
        info!(url = %self.catalog_url, "fetching product catalog");

        let response = self
            .client
            .get(&self.catalog_url)
            .send()
            .await
            .map_err(|e| CatalogError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::HttpClient(format!("HTTP {status}: {body}")));
        }

        let payload: CatalogResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::HttpClient(format!("Failed to parse catalog: {e}")))?;

        info!(products = payload.data.len(), "catalog fetched");
        Ok(payload.data)
    }

    /// Fetch the catalog, degrading to an empty batch on any failure.
    ///
    /// The store must be seeded into a valid (possibly empty) state even
    /// when the endpoint is unreachable; the failure is logged, not
    /// propagated.
    pub async fn fetch_or_empty(&self) -> Vec<CatalogRecord> {
        match self.fetch_products().await {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "catalog fetch failed, seeding empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_response_deserialization() {
        let json = r#"{
            "code": "000000",
            "message": null,
            "data": [
                {"s":"ETHBTC","b":"ETH","q":"BTC","pm":"BTC","c":"0.034","o":"0.033"},
                {"s":"TRXXRP","b":"TRX","q":"XRP","pm":"ALTS","c":"0.09","o":"0.10"}
            ]
        }"#;
        let response: CatalogResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[1].symbol.as_str(), "TRXXRP");
        assert_eq!(response.data[1].quote, "XRP");
    }

    #[tokio::test]
    async fn test_fetch_or_empty_on_unreachable_endpoint() {
        // Port 1 is never serving; fetch must degrade, not error.
        let client = CatalogClient::new("http://127.0.0.1:1/get-products").unwrap();
        let products = client.fetch_or_empty().await;
        assert!(products.is_empty());
    }
}
