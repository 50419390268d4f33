//! Polling lifecycle for release statistics
//!
//! The coordinator fetches records from a [`DataSource`], aggregates them and
//! publishes the result through a `watch` channel. It moves through
//! `Idle -> Loading -> {Ready, Failed}` and, one interval after every fetch
//! settles, back to `Loading`. Teardown returns it to `Idle`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::RefreshConfig;
use crate::refresh::source::DataSource;
use crate::refresh::state::{RefreshState, RefreshStatus};
use crate::stats::aggregate;
use crate::stats::types::MetricsSnapshot;

/// Owns the refresh loop for one dashboard.
///
/// Construct on mount, call [`start`](Self::start), and call
/// [`shutdown`](Self::shutdown) (or drop it) on unmount. Dropping cancels the
/// timer and discards any fetch still in flight.
pub struct RefreshCoordinator {
    source: Arc<dyn DataSource>,
    interval: Duration,
    status_tx: Arc<watch::Sender<RefreshStatus>>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RefreshCoordinator {
    /// Creates an idle coordinator with the default refresh interval
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let (status_tx, _) = watch::channel(RefreshStatus::default());
        Self {
            source,
            interval: RefreshConfig::default().interval(),
            status_tx: Arc::new(status_tx),
            shutdown: CancellationToken::new(),
            task: None,
        }
    }

    pub fn from_config(source: Arc<dyn DataSource>, config: &RefreshConfig) -> Self {
        Self::new(source).with_interval(config.interval())
    }

    /// Sets a custom refresh interval.
    ///
    /// A zero interval is ignored and the current interval kept.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        if interval.is_zero() {
            warn!(
                interval = ?self.interval,
                "Ignoring zero refresh interval"
            );
            return self;
        }
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts polling; the state is `Loading` when this returns and the first
    /// fetch begins immediately.
    ///
    /// Must be called from within a tokio runtime. Calling it again while the
    /// loop is running has no effect.
    pub fn start(&mut self) {
        if self.task.is_some() {
            debug!("Refresh coordinator already started");
            return;
        }

        info!(interval = ?self.interval, "Starting refresh coordinator");

        publish(&self.status_tx, &self.shutdown, |status| {
            status.state = RefreshState::Loading
        });

        self.task = Some(tokio::spawn(run_refresh_loop(
            Arc::clone(&self.source),
            self.interval,
            Arc::clone(&self.status_tx),
            self.shutdown.clone(),
        )));
    }

    /// Stops polling and waits for the refresh loop to exit.
    ///
    /// The state returns to `Idle`; the last good snapshot stays readable by
    /// existing receivers.
    pub async fn shutdown(mut self) {
        self.teardown();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Refresh loop terminated abnormally: {}", e);
            }
        }
        info!("Refresh coordinator stopped");
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<RefreshStatus> {
        self.status_tx.subscribe()
    }

    /// Current status
    pub fn status(&self) -> RefreshStatus {
        self.status_tx.borrow().clone()
    }

    pub fn state(&self) -> RefreshState {
        self.status_tx.borrow().state.clone()
    }

    /// Last successfully aggregated snapshot, if any
    pub fn snapshot(&self) -> Option<Arc<MetricsSnapshot>> {
        self.status_tx.borrow().snapshot.clone()
    }

    /// Error message of the last fetch, present only in `Failed`
    pub fn error(&self) -> Option<String> {
        self.status_tx.borrow().error().map(str::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.status_tx.borrow().is_loading()
    }

    /// Cancel the loop and publish `Idle`, once.
    ///
    /// Cancellation happens under the channel's write lock, the same lock
    /// [`publish`] checks cancellation under, so nothing the loop produces can
    /// be published afterwards.
    fn teardown(&self) {
        self.status_tx.send_if_modified(|status| {
            if self.shutdown.is_cancelled() {
                return false;
            }
            self.shutdown.cancel();
            let changed = status.state != RefreshState::Idle;
            status.state = RefreshState::Idle;
            changed
        });
    }
}

impl Drop for RefreshCoordinator {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Apply `update` unless the coordinator has been torn down.
///
/// Returns whether the update was published.
fn publish(
    status_tx: &watch::Sender<RefreshStatus>,
    shutdown: &CancellationToken,
    update: impl FnOnce(&mut RefreshStatus),
) -> bool {
    status_tx.send_if_modified(|status| {
        if shutdown.is_cancelled() {
            return false;
        }
        update(status);
        true
    })
}

/// Fetch, publish, wait one interval, repeat until cancelled.
///
/// The interval only starts once a fetch settles, so fetches never overlap.
/// `start` has already published `Loading` for the first fetch.
async fn run_refresh_loop(
    source: Arc<dyn DataSource>,
    interval: Duration,
    status_tx: Arc<watch::Sender<RefreshStatus>>,
    shutdown: CancellationToken,
) {
    loop {
        debug!("Fetching snapshot records");

        let result = tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                debug!("Refresh cancelled, discarding in-flight fetch");
                return;
            }

            result = source.fetch_snapshot_records() => result,
        };

        let published = match result {
            Ok(records) => {
                let snapshot = aggregate(&records.releases, &records.downloads);
                let (total_releases, active_releases, total_downloads) = (
                    snapshot.total_releases,
                    snapshot.active_releases,
                    snapshot.total_downloads,
                );
                let published = publish(&status_tx, &shutdown, |status| {
                    status.state = RefreshState::Ready;
                    status.snapshot = Some(Arc::new(snapshot));
                });
                if published {
                    info!(
                        total_releases,
                        active_releases,
                        total_downloads,
                        "Statistics refreshed"
                    );
                }
                published
            }
            Err(e) => {
                warn!("Failed to fetch snapshot records: {}", e);
                publish(&status_tx, &shutdown, |status| {
                    status.state = RefreshState::Failed {
                        error: e.to_string(),
                    }
                })
            }
        };

        if !published {
            debug!("Coordinator torn down, discarding fetch result");
            return;
        }

        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                debug!("Refresh loop shutting down");
                return;
            }

            _ = tokio::time::sleep(interval) => {}
        }

        if !publish(&status_tx, &shutdown, |status| {
            status.state = RefreshState::Loading
        }) {
            return;
        }
    }
}
