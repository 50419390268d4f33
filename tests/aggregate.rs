use release_stats::refresh::SnapshotRecords;
use release_stats::stats::{Channel, MetricsSnapshot, Platform, Release, aggregate};
use serde_json::json;

fn releases(platform: Platform, channel: Channel, count: usize, active: usize) -> Vec<Release> {
    (0..count)
        .map(|i| {
            Release::new(format!("1.{i}.0"), platform.clone(), channel.clone())
                .with_active(i < active)
        })
        .collect()
}

#[test]
fn dashboard_metrics_from_release_records() {
    let mut all = releases(Platform::Windows, Channel::Stable, 60, 60);
    all.extend(releases(Platform::Windows, Channel::Beta, 20, 15));
    all.extend(releases(Platform::Mac, Channel::Beta, 10, 0));
    all.extend(releases(Platform::Mac, Channel::Dev, 5, 0));
    all.extend(releases(Platform::Linux, Channel::Dev, 5, 0));

    let records: SnapshotRecords = serde_json::from_value(json!({
        "downloads": [
            { "date": "2025-01-01", "count": 1000 },
            { "date": "2025-01-02", "count": 1500 },
            { "date": "2025-01-03", "count": 2000 }
        ]
    }))
    .unwrap();

    let snapshot = aggregate(&all, &records.downloads);

    assert_eq!(
        serde_json::to_value(&snapshot).unwrap(),
        json!({
            "totalReleases": 100,
            "activeReleases": 75,
            "activePercentage": 75,
            "totalDownloads": 4500,
            "platformDistribution": { "windows": 80, "mac": 15, "linux": 5 },
            "channelDistribution": { "stable": 60, "beta": 30, "dev": 10 },
            "downloadsTrend": [
                { "date": "2025-01-01", "count": 1000 },
                { "date": "2025-01-02", "count": 1500 },
                { "date": "2025-01-03", "count": 2000 }
            ]
        })
    );
}

#[test]
fn empty_records_yield_zeroed_snapshot() {
    let records = SnapshotRecords::default();

    let snapshot = aggregate(&records.releases, &records.downloads);

    assert_eq!(snapshot, MetricsSnapshot::default());
    assert_eq!(snapshot.active_percentage, 0);
    assert!(snapshot.platform_distribution.is_empty());
    assert!(snapshot.channel_distribution.is_empty());
    assert!(snapshot.downloads_trend.is_empty());
}

#[test]
fn unflagged_feed_derives_latest_per_platform_and_channel() {
    let records: SnapshotRecords = serde_json::from_value(json!({
        "releases": [
            { "version": "1.9.9", "platform": "win", "channel": "stable" },
            { "version": "2.0.0", "platform": "win", "channel": "stable" },
            { "version": "2.1.0-beta", "platform": "win", "channel": "beta" },
            { "version": "2.0", "platform": "linux", "channel": "stable" },
            { "version": "2.0.0", "platform": "linux", "channel": "stable" }
        ]
    }))
    .unwrap();

    let snapshot = aggregate(&records.releases, &records.downloads);

    assert_eq!(snapshot.total_releases, 5);
    assert_eq!(snapshot.active_releases, 3);
    assert_eq!(snapshot.active_percentage, 60);
}

#[test]
fn unknown_tags_and_dates_are_absorbed_into_the_snapshot() {
    let records: SnapshotRecords = serde_json::from_value(json!({
        "releases": [
            { "version": "1.0.0", "platform": "android", "channel": "nightly", "active": true },
            { "version": "1.0.0", "platform": "linux", "channel": "stable", "active": false }
        ],
        "downloads": [
            { "date": "2025-01-01", "count": 10 },
            { "date": "week 2", "count": 5 }
        ]
    }))
    .unwrap();

    let snapshot = aggregate(&records.releases, &records.downloads);

    assert_eq!(
        serde_json::to_value(&snapshot).unwrap(),
        json!({
            "totalReleases": 2,
            "activeReleases": 1,
            "activePercentage": 50,
            "totalDownloads": 15,
            "platformDistribution": { "linux": 50, "android": 50 },
            "channelDistribution": { "stable": 50, "nightly": 50 },
            "downloadsTrend": [
                { "date": "2025-01-01", "count": 10 },
                { "date": "week 2", "count": 5 }
            ]
        })
    );
}
