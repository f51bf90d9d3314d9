//! Login, symbol validation, tick fetching and export orchestration.
//!
//! - [`AccountBook`] - Static credential table keyed by account name
//! - [`Session`] - Connection state and symbol validation over a [`Terminal`]
//! - [`FetchRun`] - Sequential, one-symbol-at-a-time tick download
//! - [`TickGetter`] - Owns the session, the request window and the fetched batches
//!
//! [`Terminal`]: tickgetter_terminal::Terminal

#![doc(issue_tracker_base_url = "https://github.com/rockkley/tickgetter/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accounts;
mod error;
mod fetch;
mod getter;
mod session;

pub use accounts::AccountBook;
pub use error::SessionError;
pub use fetch::{FetchOutcome, FetchRun, FetchSummary};
pub use getter::TickGetter;
pub use session::Session;
