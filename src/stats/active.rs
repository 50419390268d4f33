//! Active release resolution
//!
//! The data source normally flags which releases are active. When a release
//! arrives without a flag, it is considered active if it is the latest version
//! of its platform/channel pair.

use std::collections::HashMap;

use crate::stats::types::{Channel, Platform, Release};
use crate::version::latest_index;

/// Resolve the active flag of every release, in input order.
///
/// Explicit flags are kept as-is. Unflagged releases are active when they hold
/// the greatest version within their (platform, channel) group; among equal
/// versions the one listed first wins.
pub fn derive_active_flags(releases: &[Release]) -> Vec<bool> {
    if releases.iter().all(|r| r.active.is_some()) {
        return releases.iter().map(|r| r.active == Some(true)).collect();
    }

    let latest = latest_per_group(releases);

    releases
        .iter()
        .enumerate()
        .map(|(i, release)| {
            release
                .active
                .unwrap_or_else(|| latest.get(&(&release.platform, &release.channel)) == Some(&i))
        })
        .collect()
}

/// Index of the latest release for each (platform, channel) pair
fn latest_per_group(releases: &[Release]) -> HashMap<(&Platform, &Channel), usize> {
    let mut groups: HashMap<(&Platform, &Channel), Vec<usize>> = HashMap::new();
    for (i, release) in releases.iter().enumerate() {
        groups
            .entry((&release.platform, &release.channel))
            .or_default()
            .push(i);
    }

    groups
        .into_iter()
        .filter_map(|(key, indices)| {
            let versions: Vec<&str> = indices
                .iter()
                .map(|&i| releases[i].version.as_str())
                .collect();
            latest_index(&versions).map(|pos| (key, indices[pos]))
        })
        .collect()
}
