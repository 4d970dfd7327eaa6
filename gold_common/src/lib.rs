//!
//! Common types and pure helpers used by the gold price monitor.
//!
//! This crate aggregates:
//! - `error` — unified error type `MonitorError` used across the workspace.
//! - `result` — handy `Result<T, MonitorError>` alias.
//! - `quote` — upstream rates payload and troy ounce to gram conversion.
//! - `record` — the persisted `PriceRecord` and its file-backed `PriceStore`.
//! - `alert` — delta, threshold check and notification message formatting.
//! - `api` — endpoint constants.
#![warn(missing_docs)]
pub mod alert;
pub mod api;
pub mod error;
pub mod quote;
pub mod record;
pub mod result;

pub use error::MonitorError;
pub use quote::Quote;
pub use record::{PriceRecord, PriceStore};
pub use result::Result;
