//! HTTP implementation of [`StockService`] backed by `reqwest`.
//!
//! Talks to a JSON API with two resources:
//!
//! - `GET {base}/stock/{id}` -> `{ "id": 1, "amount": 3 }`
//! - `GET {base}/products/{id}` -> `{ "id": 1, "name": "...", "price": 179.9, "imageUrl": "..." }`

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{StockService, StockServiceError};
use crate::model::{ProductId, ProductMetadata, Stock};

const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Stock service client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStockService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStockService {
    /// Builds a client for the API rooted at `base_url`.
    ///
    /// `timeout` bounds each whole request; a request that exceeds it is a service failure.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StockServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, StockServiceError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StockServiceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.json::<T>().await?;
        debug!(%url, "Fetched");
        Ok(body)
    }
}

#[async_trait]
impl StockService for HttpStockService {
    #[instrument(skip(self))]
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, StockServiceError> {
        self.fetch(&format!("stock/{}", product_id.0)).await
    }

    #[instrument(skip(self))]
    async fn get_product(
        &self,
        product_id: ProductId,
    ) -> Result<ProductMetadata, StockServiceError> {
        self.fetch(&format!("products/{}", product_id.0)).await
    }
}
