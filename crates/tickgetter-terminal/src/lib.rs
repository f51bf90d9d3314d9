//! Trading terminal abstraction for the tickgetter tick exporter.
//!
//! This crate models the external terminal the exporter talks to:
//!
//! - [`Terminal`] - The collaborator surface (connect, symbols, ticks, shutdown)
//! - [`TerminalStatus`] - Closed set of request outcomes translated from raw codes
//! - [`MemoryTerminal`] - Scripted in-process terminal
//! - [`ArchiveTerminal`] - Offline terminal backed by a directory of tick files

#![doc(issue_tracker_base_url = "https://github.com/rockkley/tickgetter/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod archive;
mod memory;
pub mod status;
mod terminal;

pub use archive::{ArchiveManifest, ArchiveTerminal};
pub use memory::MemoryTerminal;
pub use status::TerminalStatus;
pub use terminal::{Terminal, TerminalError, TickResponse};
