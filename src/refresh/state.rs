use std::sync::Arc;

use crate::stats::types::MetricsSnapshot;

/// Lifecycle state of a refresh coordinator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RefreshState {
    /// Not running: not started yet or shut down
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Ready,
    /// The last fetch failed
    Failed { error: String },
}

impl RefreshState {
    /// Returns the string representation of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshState::Idle => "idle",
            RefreshState::Loading => "loading",
            RefreshState::Ready => "ready",
            RefreshState::Failed { .. } => "failed",
        }
    }
}

/// What consumers observe: the current state plus the last good snapshot.
///
/// The snapshot survives `Loading` and `Failed`, so a display can keep
/// showing it while a refresh is pending or after one failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshStatus {
    pub state: RefreshState,
    pub snapshot: Option<Arc<MetricsSnapshot>>,
}

impl RefreshStatus {
    pub fn is_loading(&self) -> bool {
        self.state == RefreshState::Loading
    }

    /// Error message of the last fetch, present only in `Failed`
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RefreshState::Failed { error } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RefreshState::Idle, "idle", None)]
    #[case(RefreshState::Loading, "loading", None)]
    #[case(RefreshState::Ready, "ready", None)]
    #[case(RefreshState::Failed { error: "boom".to_string() }, "failed", Some("boom"))]
    fn status_exposes_error_only_when_failed(
        #[case] state: RefreshState,
        #[case] name: &str,
        #[case] error: Option<&str>,
    ) {
        let status = RefreshStatus {
            state,
            snapshot: None,
        };

        assert_eq!(status.state.as_str(), name);
        assert_eq!(status.error(), error);
    }
}
