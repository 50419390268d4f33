//! Aggregation of release and download records into a metrics snapshot

use std::collections::BTreeMap;

use crate::stats::active::derive_active_flags;
use crate::stats::types::{DownloadEvent, MetricsSnapshot, Release};

/// Aggregate releases and download events into a [`MetricsSnapshot`].
///
/// Pure and infallible: empty input yields a zeroed snapshot. The download
/// trend is copied in the order given, without sorting or merging dates.
pub fn aggregate(releases: &[Release], download_events: &[DownloadEvent]) -> MetricsSnapshot {
    let total_releases = releases.len();
    let active_releases = derive_active_flags(releases)
        .into_iter()
        .filter(|&active| active)
        .count();

    MetricsSnapshot {
        total_releases,
        active_releases,
        active_percentage: percentage(active_releases, total_releases),
        total_downloads: download_events
            .iter()
            .fold(0u64, |sum, event| sum.saturating_add(event.count)),
        platform_distribution: distribution(
            releases.iter().map(|r| r.platform.clone()),
            total_releases,
        ),
        channel_distribution: distribution(
            releases.iter().map(|r| r.channel.clone()),
            total_releases,
        ),
        downloads_trend: download_events.to_vec(),
    }
}

/// Share of `total` taken by each key, rounded independently
fn distribution<K: Ord>(keys: impl Iterator<Item = K>, total: usize) -> BTreeMap<K, u32> {
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(key, count)| (key, percentage(count, total)))
        .collect()
}

/// `count / total * 100` rounded half up; 0 when `total` is 0
fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let (count, total) = (count as u128, total as u128);
    ((count * 200 + total) / (total * 2)) as u32
}
