//! Catalog files served over plain HTTP.

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use super::{CatalogError, CatalogSource};
use crate::utils::HttpClient;

/// Fetches `{base}/{file}` with a GET request
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: HttpClient,
    base: Url,
}

impl HttpSource {
    /// Create a source rooted at `base` (e.g. `https://host/research-bank`)
    pub fn new(base: &str, timeout: Duration) -> Result<Self, CatalogError> {
        Self::with_client(base, HttpClient::with_timeout(timeout)?)
    }

    /// Create a source that shares an existing client
    pub fn with_client(base: &str, client: HttpClient) -> Result<Self, CatalogError> {
        Ok(Self {
            client,
            base: Self::normalize_base(base)?,
        })
    }

    // Url::join drops the last path segment unless the base ends with '/'
    fn normalize_base(base: &str) -> Result<Url, CatalogError> {
        let mut base = base.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base).map_err(|e| CatalogError::InvalidSource(format!("{}: {}", base, e)))
    }

    /// Full URL for a catalog file
    pub fn url_for(&self, file_name: &str) -> Result<Url, CatalogError> {
        self.base
            .join(file_name.trim_start_matches('/'))
            .map_err(|e| CatalogError::InvalidSource(format!("{}: {}", file_name, e)))
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn id(&self) -> &str {
        "http"
    }

    fn location(&self) -> String {
        self.base.to_string()
    }

    async fn fetch(&self, file_name: &str) -> Result<String, CatalogError> {
        let url = self.url_for(file_name)?;
        tracing::debug!(%url, "Fetching catalog");

        let response = self.client.client().get(url.clone()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
