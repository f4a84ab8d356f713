//! Catalog sources: where flat-file catalogs are fetched from.
//!
//! This module defines the [`CatalogSource`] trait. A source resolves a file
//! name (e.g. `medical_datasets.csv`) relative to its base and returns the
//! file's text. Three implementations ship with the crate:
//!
//! - [`HttpSource`] - plain HTTP GET of `{base}/{file}`
//! - [`DirSource`] - read `{dir}/{file}` from the local filesystem
//! - [`MockSource`] - in-memory files, for tests and embedding
//!
//! Use [`source_for_base`] to pick between the HTTP and directory sources
//! from a configured base string.

mod dir;
mod http;
pub mod mock;

pub use dir::DirSource;
pub use http::HttpSource;
pub use mock::MockSource;

use async_trait::async_trait;
use std::time::Duration;

/// A place catalog files can be fetched from
#[async_trait]
pub trait CatalogSource: Send + Sync + std::fmt::Debug {
    /// Short identifier used in logs ("http", "dir", "mock")
    fn id(&self) -> &str;

    /// Human-readable location of the source
    fn location(&self) -> String;

    /// Fetch the full text of a catalog file
    async fn fetch(&self, file_name: &str) -> Result<String, CatalogError>;
}

/// Errors that can occur while fetching a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// File or URL not found
    #[error("Catalog not found: {0}")]
    NotFound(String),

    /// Base location could not be interpreted
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Network(err.to_string())
    }
}

/// Build the source for a configured base: `http(s)://` URLs fetch over
/// HTTP with the given timeout, anything else is a local directory.
pub fn source_for_base(base: &str, timeout: Duration) -> Result<Box<dyn CatalogSource>, CatalogError> {
    let trimmed = base.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidSource("empty base".to_string()));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(Box::new(HttpSource::new(trimmed, timeout)?))
    } else {
        Ok(Box::new(DirSource::new(trimmed)))
    }
}
