//! On-disk archive of raw search responses.
//!
//! Each response is written pretty-printed to `<dir>/<query>.json`, with
//! spaces and path separators in the query replaced by `_`. Archived files
//! replay offline through [`ResponseArchive::load`].

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::client::decode_response;
use crate::error::FlyerError;
use crate::types::SearchResponse;

#[derive(Debug, Clone)]
pub struct ResponseArchive {
    dir: PathBuf,
}

impl ResponseArchive {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File the response for `query` is archived under.
    #[must_use]
    pub fn path_for(&self, query: &str) -> PathBuf {
        let stem: String = query
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' => '_',
                other => other,
            })
            .collect();
        self.dir.join(format!("{stem}.json"))
    }

    /// Writes `body` for `query`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`FlyerError::ArchiveIo`] if the directory or file cannot be
    /// written.
    pub async fn save(&self, query: &str, body: &Value) -> Result<PathBuf, FlyerError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| FlyerError::ArchiveIo {
                path: self.dir.display().to_string(),
                source,
            })?;

        let path = self.path_for(query);
        let json = serde_json::to_string_pretty(body).map_err(|e| FlyerError::Deserialize {
            context: format!("archive(q={query})"),
            source: e,
        })?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|source| FlyerError::ArchiveIo {
                path: path.display().to_string(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "archived search response");
        Ok(path)
    }

    /// Reads an archived response back.
    ///
    /// # Errors
    ///
    /// Returns [`FlyerError::ArchiveIo`] if the file cannot be read, or
    /// [`FlyerError::Deserialize`] if it is not a search response.
    pub fn load(path: &Path) -> Result<SearchResponse, FlyerError> {
        let text = std::fs::read_to_string(path).map_err(|source| FlyerError::ArchiveIo {
            path: path.display().to_string(),
            source,
        })?;
        let body: Value = serde_json::from_str(&text).map_err(|e| FlyerError::Deserialize {
            context: path.display().to_string(),
            source: e,
        })?;
        decode_response(&path.display().to_string(), body)
    }
}
