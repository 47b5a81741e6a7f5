//! Typed HTTP client for the data service.
//!
//! [`DataServiceClient`] owns the connection pool and the decoding rules; the
//! per-resource clients only name paths and types.

use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::{Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use configs::DataServiceConfig;

use crate::errors::{self, GatewayError};

mod categories;
mod inventory;
mod products;

pub use categories::CategoryClient;
pub use inventory::InventoryClient;
pub use products::ProductClient;

/// What a single-object call does when the data service answers 2xx with no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyBody {
    /// Reads: nothing there.
    NotFound,
    /// Writes: the data service broke its contract.
    Error,
}

#[derive(Clone, Debug)]
pub struct DataServiceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DataServiceClient {
    pub fn new(cfg: &DataServiceConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .context("building data service http client")?;
        Self::with_client(http, &cfg.base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).with_context(|| format!("invalid data service url {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("data service url cannot be a base: {base_url}"));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Appends percent-encoded path segments to the base url.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Vec<u8>, GatewayError> {
        let url = self.url(segments);
        let mut req = self.http.request(method.clone(), url.clone());
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(b) = body {
            req = req.json(b);
        }
        debug!(%method, %url, "calling data service");
        let resp = req.send().await.map_err(|e| errors::from_transport(e, url.as_str()))?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| errors::from_transport(e, url.as_str()))?;
        if !status.is_success() {
            return Err(errors::from_status(status, &bytes, url.as_str()));
        }
        Ok(bytes.to_vec())
    }

    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Vec<T>, GatewayError> {
        let bytes = self.execute::<()>(Method::GET, segments, query, None).await?;
        decode_list(&bytes)
    }

    pub(crate) async fn get_one<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, GatewayError> {
        let bytes = self.execute::<()>(Method::GET, segments, &[], None).await?;
        decode_one(&bytes, EmptyBody::NotFound)
    }

    pub(crate) async fn send_one<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, GatewayError> {
        let bytes = self.execute(method, segments, &[], body).await?;
        decode_one(&bytes, EmptyBody::Error)
    }

    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<(), GatewayError> {
        self.execute::<()>(Method::DELETE, segments, &[], None).await?;
        Ok(())
    }
}

fn is_empty(bytes: &[u8]) -> bool {
    let trimmed = String::from_utf8_lossy(bytes);
    let trimmed = trimmed.trim();
    trimmed.is_empty() || trimmed == "null"
}

/// An empty success body is an empty list.
pub fn decode_list<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, GatewayError> {
    if is_empty(bytes) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(bytes).map_err(|e| decode_failed(e.to_string()))
}

pub fn decode_one<T: DeserializeOwned>(bytes: &[u8], empty: EmptyBody) -> Result<T, GatewayError> {
    if is_empty(bytes) {
        let err = match empty {
            EmptyBody::NotFound => GatewayError::NotFound("Resource not found in data service".into()),
            EmptyBody::Error => GatewayError::DataService {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                message: "Empty response from data service".into(),
            },
        };
        errors::record(&err);
        return Err(err);
    }
    serde_json::from_slice(bytes).map_err(|e| decode_failed(e.to_string()))
}

fn decode_failed(msg: String) -> GatewayError {
    let err = GatewayError::Decode(msg);
    errors::record(&err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::CategoryDto;

    #[test]
    fn empty_bodies_follow_call_kind() {
        let list: Vec<CategoryDto> = decode_list(b"").unwrap();
        assert!(list.is_empty());
        let list: Vec<CategoryDto> = decode_list(b"null").unwrap();
        assert!(list.is_empty());

        let read = decode_one::<CategoryDto>(b" ", EmptyBody::NotFound).unwrap_err();
        assert!(matches!(read, GatewayError::NotFound(_)));
        let write = decode_one::<CategoryDto>(b"", EmptyBody::Error).unwrap_err();
        assert_eq!(write.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn malformed_bodies_are_decode_errors() {
        let err = decode_one::<CategoryDto>(b"{\"id\": \"x\"", EmptyBody::NotFound).unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
        let err = decode_list::<CategoryDto>(b"{}").unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[test]
    fn path_segments_are_encoded() {
        let client = DataServiceClient::with_client(reqwest::Client::new(), "http://localhost:8081/").unwrap();
        let url = client.url(&["data", "categories", "name", "Home Garden"]);
        assert_eq!(url.as_str(), "http://localhost:8081/data/categories/name/Home%20Garden");
        let url = client.url(&["data", "products", "a/b"]);
        assert_eq!(url.as_str(), "http://localhost:8081/data/products/a%2Fb");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(DataServiceClient::with_client(reqwest::Client::new(), "mailto:x@y").is_err());
        assert!(DataServiceClient::with_client(reqwest::Client::new(), "not a url").is_err());
    }
}
