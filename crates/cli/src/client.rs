//! HTTP client for a running catalog-server.

use std::time::Duration;

use catalog_core::{CatalogSummary, Product, ProductId};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("could not reach `{url}`: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("`{url}` returned {status}")]
    UnexpectedStatus { url: String, status: StatusCode },
    #[error("failed to decode response from `{url}`: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Body of `GET /health`, served with 200 when ready and 503 when degraded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub catalog: CatalogHealth,
    pub checked_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogHealth {
    pub status: String,
    pub detail: String,
    pub summary: Option<CatalogSummary>,
}

impl HealthReport {
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[derive(Clone, Debug)]
pub struct CatalogClient {
    base_url: String,
    http: Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http =
            Client::builder().timeout(REQUEST_TIMEOUT).build().map_err(ClientError::Build)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthReport, ClientError> {
        let url = format!("{}/health", self.base_url);
        let response = self.get(&url).await?;
        match response.status() {
            StatusCode::OK | StatusCode::SERVICE_UNAVAILABLE => decode(url, response).await,
            status => Err(ClientError::UnexpectedStatus { url, status }),
        }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let url = format!("{}/api/products", self.base_url);
        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Err(ClientError::UnexpectedStatus { url, status: response.status() });
        }
        decode(url, response).await
    }

    /// `Ok(None)` when the server answers 404.
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, ClientError> {
        let url = format!("{}/api/products/{id}", self.base_url);
        let response = self.get(&url).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => decode(url, response).await.map(Some),
            status => Err(ClientError::UnexpectedStatus { url, status }),
        }
    }

    async fn get(&self, url: &str) -> Result<Response, ClientError> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Unreachable { url: url.to_string(), source })
    }
}

async fn decode<T: DeserializeOwned>(url: String, response: Response) -> Result<T, ClientError> {
    response.json::<T>().await.map_err(|source| ClientError::Decode { url, source })
}
