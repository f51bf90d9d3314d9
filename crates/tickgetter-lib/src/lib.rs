//! Download raw ticks from a trading terminal and export them to files.
//!
//! This is a facade crate that re-exports the tickgetter workspace crates.
//!
//! # Quick Start
//!
//! ```ignore
//! use tickgetter_lib::prelude::*;
//!
//! let accounts: AccountBook = toml::from_str(&std::fs::read_to_string("accounts.toml")?)?;
//! let mut getter = TickGetter::new(ArchiveTerminal::new());
//! getter.set_dates(
//!     chrono::NaiveDate::from_ymd_opt(2022, 12, 2).unwrap(),
//!     chrono::NaiveDate::from_ymd_opt(2023, 1, 19).unwrap(),
//! )?;
//! getter.login_key(&accounts, "demo")?;
//!
//! let summary = getter.get_ticks(&["EURUSD", "XAUUSD"])?;
//! println!("{} of {} symbols fetched", summary.fetched, summary.requested);
//!
//! for path in getter.save_ticks_to_file(".", "csv")? {
//!     println!("saved {}", path.display());
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/rockkley/tickgetter/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use tickgetter_types::*;

pub use tickgetter_terminal::{
    ArchiveManifest, ArchiveTerminal, MemoryTerminal, Terminal, TerminalError, TerminalStatus,
    TickResponse, status,
};

pub use tickgetter_format::{
    CsvFormatter, ExportDispatcher, ExportError, FormatError, Formatter, HtmlFormatter,
    JsonFormatter, OutputFormat, XlsxFormatter, XmlFormatter,
};

#[cfg(feature = "parquet")]
pub use tickgetter_format::ParquetFormatter;

pub use tickgetter_session::{
    AccountBook, FetchOutcome, FetchRun, FetchSummary, Session, SessionError, TickGetter,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tickgetter_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickgetter_types::{Credentials, DateRange, DateRangeError, SymbolTicks, Tick};

    pub use tickgetter_terminal::{ArchiveTerminal, Terminal, TerminalStatus};

    pub use tickgetter_format::{ExportDispatcher, ExportError, OutputFormat};

    pub use tickgetter_session::{
        AccountBook, FetchOutcome, FetchSummary, SessionError, TickGetter,
    };
}
