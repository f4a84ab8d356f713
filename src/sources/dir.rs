//! Catalog files read from a local directory.

use async_trait::async_trait;
use std::path::PathBuf;

use super::{CatalogError, CatalogSource};

/// Reads `{root}/{file}` from disk
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CatalogSource for DirSource {
    fn id(&self) -> &str {
        "dir"
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, file_name: &str) -> Result<String, CatalogError> {
        let path = self.root.join(file_name);
        tracing::debug!(path = %path.display(), "Reading catalog");

        match tokio::fs::read(&path).await {
            // Same lossy decoding an HTTP body gets
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CatalogError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fetch_existing_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("general_datasets.csv"), "名称\nCOCO\n").unwrap();

        let source = DirSource::new(dir.path());
        let text = source.fetch("general_datasets.csv").await.unwrap();
        assert_eq!(text, "名称\nCOCO\n");
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = tempdir().unwrap();
        let source = DirSource::new(dir.path());

        assert!(matches!(
            source.fetch("nope.csv").await,
            Err(CatalogError::NotFound(_))
        ));
    }
}
