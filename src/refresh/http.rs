//! HTTP data source

use std::time::Duration;

use tracing::warn;

use crate::config::FETCH_TIMEOUT_MS;
use crate::refresh::error::FetchError;
use crate::refresh::source::{DataSource, SnapshotRecords};

/// Data source fetching a JSON `SnapshotRecords` document over HTTP
///
/// Each call issues a single GET; retrying is left to the coordinator's
/// polling schedule.
pub struct HttpDataSource {
    client: reqwest::Client,
    url: String,
}

impl HttpDataSource {
    pub fn new(url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent("release-stats")
            .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_snapshot_records(&self) -> Result<SnapshotRecords, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Stats endpoint returned status {}: {}", status, self.url);
            return Err(FetchError::Status(status.as_u16()));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse stats response: {}", e);
            FetchError::InvalidResponse(e.to_string())
        })
    }
}
