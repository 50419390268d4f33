//! Release statistics
//!
//! Turns the raw release and download records reported by a data source into
//! the metrics a dashboard displays.
//!
//! # Modules
//!
//! - [`types`]: `Release`, `DownloadEvent`, `MetricsSnapshot` and their tags
//! - [`active`]: resolves which releases are active
//! - [`aggregator`]: the pure `aggregate` pass

pub mod active;
pub mod aggregator;
pub mod types;

pub use active::derive_active_flags;
pub use aggregator::aggregate;
pub use types::{Channel, DownloadEvent, MetricsSnapshot, Platform, Release};
