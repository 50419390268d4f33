//! Data source trait for acquiring release and download records

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::refresh::error::FetchError;
use crate::stats::types::{DownloadEvent, Release};

/// Records returned by one fetch of the data source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotRecords {
    pub releases: Vec<Release>,
    /// Download events, expected in ascending date order
    pub downloads: Vec<DownloadEvent>,
}

impl SnapshotRecords {
    pub fn new(releases: Vec<Release>, downloads: Vec<DownloadEvent>) -> Self {
        Self {
            releases,
            downloads,
        }
    }
}

/// Trait for fetching the current snapshot of records
///
/// The refresh coordinator is the only caller and never invokes
/// `fetch_snapshot_records` while a previous call is still pending.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches the current releases and download events
    ///
    /// # Returns
    /// * `Ok(SnapshotRecords)` - Records as reported by the source
    /// * `Err(FetchError)` - If the fetch fails
    async fn fetch_snapshot_records(&self) -> Result<SnapshotRecords, FetchError>;
}

/// Data source reading a JSON `SnapshotRecords` document from disk
pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl DataSource for FileDataSource {
    async fn fetch_snapshot_records(&self) -> Result<SnapshotRecords, FetchError> {
        debug!("Reading snapshot records from {:?}", self.path);

        let content = tokio::fs::read_to_string(&self.path).await?;

        serde_json::from_str(&content).map_err(|e| {
            warn!("Failed to parse snapshot records in {:?}: {}", self.path, e);
            FetchError::InvalidResponse(e.to_string())
        })
    }
}
