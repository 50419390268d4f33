//! Refresh layer
//!
//! Polls a data source on a fixed interval and publishes aggregated
//! statistics to whoever renders them.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ DataSource  │────▶│ Coordinator │────▶│  Renderer   │
//! │  (fetch)    │     │ (state/poll)│     │  (watch rx) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │  aggregate  │
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`coordinator`]: `RefreshCoordinator`, the polling state machine
//! - [`source`]: `DataSource` trait, `SnapshotRecords` and the file source
//! - [`http`]: HTTP data source
//! - [`state`]: `RefreshState` and the observable `RefreshStatus`
//! - [`error`]: `FetchError`

pub mod coordinator;
pub mod error;
pub mod http;
pub mod source;
pub mod state;

pub use coordinator::RefreshCoordinator;
pub use error::FetchError;
pub use http::HttpDataSource;
pub use source::{DataSource, FileDataSource, SnapshotRecords};
pub use state::{RefreshState, RefreshStatus};
