//! In-memory source for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::sources::{CatalogError, CatalogSource};

#[derive(Debug, Clone)]
enum Entry {
    Text(String),
    Failure(String),
}

/// A source that serves predefined file contents or failures.
#[derive(Debug, Default)]
pub struct MockSource {
    files: HashMap<String, Entry>,
    fetches: AtomicUsize,
}

impl MockSource {
    /// Create an empty mock source; every fetch reports not found.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` for `file_name`.
    pub fn with_file(mut self, file_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(file_name.into(), Entry::Text(text.into()));
        self
    }

    /// Fail fetches of `file_name` with a network error.
    pub fn with_failure(mut self, file_name: impl Into<String>, message: impl Into<String>) -> Self {
        self.files
            .insert(file_name.into(), Entry::Failure(message.into()));
        self
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn fetch(&self, file_name: &str) -> Result<String, CatalogError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.files.get(file_name) {
            Some(Entry::Text(text)) => Ok(text.clone()),
            Some(Entry::Failure(message)) => Err(CatalogError::Network(message.clone())),
            None => Err(CatalogError::NotFound(file_name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source() {
        let source = MockSource::new()
            .with_file("a.csv", "name\nA\n")
            .with_failure("b.csv", "connection reset");

        assert_eq!(source.fetch("a.csv").await.unwrap(), "name\nA\n");
        assert!(matches!(
            source.fetch("b.csv").await,
            Err(CatalogError::Network(_))
        ));
        assert!(matches!(
            source.fetch("c.csv").await,
            Err(CatalogError::NotFound(_))
        ));
        assert_eq!(source.fetch_count(), 3);
    }
}
