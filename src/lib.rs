//! Release analytics engine
//!
//! Orders release versions, aggregates release and download records into
//! dashboard metrics, and keeps those metrics fresh by polling a data source.
//!
//! # Modules
//!
//! - [`version`]: version parsing and ordering
//! - [`stats`]: record types and the aggregation pass
//! - [`refresh`]: data sources and the refresh coordinator
//! - [`config`]: configuration and paths
//! - [`logging`]: tracing setup

pub mod config;
pub mod logging;
pub mod refresh;
pub mod stats;
pub mod version;
