//! Core types for the tickgetter tick exporter.
//!
//! This crate provides the fundamental data structures shared by the
//! terminal, session and format crates:
//!
//! - [`Tick`] - A single quote with timestamp, bid, ask, last price and volume
//! - [`DateRange`] - Half-open `[from, to)` request window
//! - [`Credentials`] - Static login record for a terminal account
//! - [`SymbolTicks`] - Ticks fetched for one symbol, ready for export

#![doc(issue_tracker_base_url = "https://github.com/rockkley/tickgetter/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod account;
mod batch;
mod date_range;
mod error;
mod tick;

pub use account::{AccountInfo, Credentials, SymbolInfo};
pub use batch::{SymbolTicks, broker_label};
pub use date_range::DateRange;
pub use error::DateRangeError;
pub use tick::Tick;
