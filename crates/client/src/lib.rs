//! HTTP client binding for the bookstand API.
//!
//! One [`ApiClient`] is constructed at bootstrap from the configured
//! base URL; every request the application makes is resolved against
//! it. Requests are single-shot: no retries, no caching.

use std::time::Duration;

use bookstand_kernel::settings::ApiSettings;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

pub mod error;

pub use error::ApiError;

/// Thin wrapper around a [`reqwest::Client`] bound to a base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Bind a client to `base_url` with a per-request timeout.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ApiError> {
        let mut url = Url::parse(base_url).map_err(|source| ApiError::BaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        // Relative joins drop the last path segment unless the base
        // ends with a slash, so normalize once here.
        if !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }
        let http = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            http,
            base_url: url,
        })
    }

    pub fn from_settings(api: &ApiSettings) -> Result<Self, ApiError> {
        Self::new(&api.url, Duration::from_millis(api.request_timeout_ms))
    }

    /// Resolve a path relative to the configured base URL.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| ApiError::Path {
                path: path.to_string(),
                source,
            })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.http.get(url.clone()).send().await?;
        let response = check_status(Method::GET, url, response).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.http.post(url.clone()).json(body).send().await?;
        let response = check_status(Method::POST, url, response).await?;
        Ok(response.json().await?)
    }

    /// PUT a JSON body, discarding whatever the server responds with.
    pub async fn put_json<B: Serialize>(&self, url: Url, body: &B) -> Result<(), ApiError> {
        let response = self.http.put(url.clone()).json(body).send().await?;
        check_status(Method::PUT, url, response).await?;
        Ok(())
    }

    /// DELETE a resource, discarding the response body.
    pub async fn delete(&self, url: Url) -> Result<(), ApiError> {
        let response = self.http.delete(url.clone()).send().await?;
        check_status(Method::DELETE, url, response).await?;
        Ok(())
    }
}

async fn check_status(method: Method, url: Url, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        tracing::debug!(%method, %url, %status, "request completed");
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%method, %url, %status, "request failed");
    Err(ApiError::from_status(method, url, status, body))
}
