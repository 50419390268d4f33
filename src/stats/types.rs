//! Record and snapshot types for release statistics

use std::collections::BTreeMap;
use std::convert::Infallible;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Platform a release is built for
///
/// Tags outside the known set are kept as [`Platform::Other`] so an
/// unfamiliar platform shows up in the distribution instead of failing the
/// whole feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Windows,
    Mac,
    Linux,
    /// Any other tag, lowercased
    Other(String),
}

impl Platform {
    /// Returns the string representation of the platform
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Windows => "windows",
            Platform::Mac => "mac",
            Platform::Linux => "linux",
            Platform::Other(tag) => tag,
        }
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        let tag = s.trim().to_ascii_lowercase();
        match tag.as_str() {
            "windows" | "win" => Platform::Windows,
            "mac" | "macos" | "darwin" => Platform::Mac,
            "linux" => Platform::Linux,
            _ => Platform::Other(tag),
        }
    }
}

impl From<String> for Platform {
    fn from(s: String) -> Self {
        Platform::from(s.as_str())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Platform::from(s))
    }
}

/// Release track
///
/// Unknown tracks are kept as [`Channel::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Channel {
    Stable,
    Beta,
    Dev,
    /// Any other tag, lowercased
    Other(String),
}

impl Channel {
    /// Returns the string representation of the channel
    pub fn as_str(&self) -> &str {
        match self {
            Channel::Stable => "stable",
            Channel::Beta => "beta",
            Channel::Dev => "dev",
            Channel::Other(tag) => tag,
        }
    }
}

impl From<&str> for Channel {
    fn from(s: &str) -> Self {
        let tag = s.trim().to_ascii_lowercase();
        match tag.as_str() {
            "stable" => Channel::Stable,
            "beta" => Channel::Beta,
            "dev" => Channel::Dev,
            _ => Channel::Other(tag),
        }
    }
}

impl From<String> for Channel {
    fn from(s: String) -> Self {
        Channel::from(s.as_str())
    }
}

impl From<Channel> for String {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::str::FromStr for Channel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Channel::from(s))
    }
}

/// A published release as reported by the data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Version identifier (e.g., "1.2.3")
    pub version: String,
    pub platform: Platform,
    pub channel: Channel,
    /// Active flag from the data source; `None` when the source omitted it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Release {
    pub fn new(version: impl Into<String>, platform: Platform, channel: Channel) -> Self {
        Self {
            version: version.into(),
            platform,
            channel,
            active: None,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Date of a download event
///
/// ISO dates (`YYYY-MM-DD`) are parsed; anything else is carried through
/// verbatim since the trend is never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrendDate {
    Day(NaiveDate),
    Raw(String),
}

impl From<NaiveDate> for TrendDate {
    fn from(date: NaiveDate) -> Self {
        TrendDate::Day(date)
    }
}

impl From<&str> for TrendDate {
    fn from(s: &str) -> Self {
        s.parse::<NaiveDate>()
            .map(TrendDate::Day)
            .unwrap_or_else(|_| TrendDate::Raw(s.to_string()))
    }
}

/// Downloads counted for a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadEvent {
    pub date: TrendDate,
    pub count: u64,
}

impl DownloadEvent {
    pub fn new(date: impl Into<TrendDate>, count: u64) -> Self {
        Self {
            date: date.into(),
            count,
        }
    }
}

/// Aggregated metrics produced by one aggregation pass
///
/// Percentages are whole numbers in `0..=100`, rounded independently, so a
/// distribution does not necessarily sum to exactly 100.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_releases: usize,
    pub active_releases: usize,
    pub active_percentage: u32,
    pub total_downloads: u64,
    pub platform_distribution: BTreeMap<Platform, u32>,
    pub channel_distribution: BTreeMap<Channel, u32>,
    /// Download events in the order they were supplied
    pub downloads_trend: Vec<DownloadEvent>,
}
