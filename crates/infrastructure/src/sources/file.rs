//! Style sources backed by `.css` files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dynamo_application::{SourceError, StyleBatch, StyleSource};
use tokio::fs;
use tracing::{debug, warn};

/// Reads style text from files and directories using `tokio::fs`.
///
/// A directory contributes every `.css` file directly inside it, sorted by
/// name. Each file becomes one entry of the batch.
#[derive(Debug, Clone, Default)]
pub struct FileStyleSource {
    paths: Vec<PathBuf>,
}

impl FileStyleSource {
    /// Creates a source over the given files or directories.
    #[must_use]
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the configured paths.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    async fn stylesheets_in(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
        let mut entries = fs::read_dir(dir).await?;
        let mut sheets = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "css") {
                sheets.push(path);
            }
        }
        sheets.sort();
        Ok(sheets)
    }
}

#[async_trait]
impl StyleSource for FileStyleSource {
    async fn collect(&self) -> Result<StyleBatch, SourceError> {
        let mut sheets = Vec::new();
        for path in &self.paths {
            let metadata = fs::metadata(path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SourceError::NotFound(path.clone())
                } else {
                    SourceError::Io(e)
                }
            })?;

            if metadata.is_dir() {
                sheets.extend(Self::stylesheets_in(path).await?);
            } else {
                sheets.push(path.clone());
            }
        }

        let mut batch = StyleBatch::new();
        for sheet in sheets {
            match fs::read_to_string(&sheet).await {
                Ok(text) => batch.push(text),
                Err(e) => {
                    warn!(path = %sheet.display(), error = %e, "Cannot read stylesheet, skipping");
                }
            }
        }

        debug!(sheets = batch.len(), "Collected stylesheets");
        Ok(batch)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_collect_single_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.css");
        fs::write(&path, ".a { color: var(--a) }").await.unwrap();

        let batch = FileStyleSource::new([&path]).collect().await.unwrap();
        assert_eq!(batch.rules(), [".a { color: var(--a) }".to_string()]);
    }

    #[tokio::test]
    async fn test_collect_directory_sorted_css_only() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.css"), "b").await.unwrap();
        fs::write(dir.path().join("a.css"), "a").await.unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored")
            .await
            .unwrap();

        let batch = FileStyleSource::new([dir.path()]).collect().await.unwrap();
        assert_eq!(batch.rules(), ["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.css");

        let err = FileStyleSource::new([&missing])
            .collect()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound(path) if path == missing));
    }

    #[tokio::test]
    async fn test_unreadable_sheet_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.css"), "ok").await.unwrap();
        fs::write(dir.path().join("b.css"), b"\xff\xfe\x00")
            .await
            .unwrap();

        let batch = FileStyleSource::new([dir.path()]).collect().await.unwrap();
        assert_eq!(batch.rules(), ["ok".to_string()]);
    }
}
