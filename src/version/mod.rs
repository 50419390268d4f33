//! Version ordering for release identifiers
//!
//! Release versions are dot-separated numeric identifiers such as `"1.2.3"`.
//! Parsing never fails: every segment is reduced to the number formed by its
//! leading digits (0 when there are none), and missing trailing segments
//! compare as zero.
//!
//! ```text
//! "1.2.3-rc1" ──parse──▶ [1, 2, 3]
//! "1.2"       ──parse──▶ [1, 2]      == [1, 2, 0]
//! ```
//!
//! # Modules
//!
//! - [`compare`]: `parse`, `compare` and latest-version selection

pub mod compare;

pub use compare::{ParsedVersion, compare, latest_index, parse};
