//! The terminal collaborator trait.

use std::path::PathBuf;

use thiserror::Error;
use tickgetter_types::{AccountInfo, Credentials, DateRange, SymbolInfo, Tick};

use crate::TerminalStatus;

/// Errors raised while connecting to a terminal.
#[derive(Error, Debug)]
pub enum TerminalError {
    /// No terminal could be found at the configured path.
    #[error("No terminal found at '{0}'")]
    MissingTerminal(PathBuf),

    /// The terminal manifest could not be parsed.
    #[error("Invalid terminal manifest '{path}': {source}")]
    Manifest {
        /// Manifest path.
        path: PathBuf,
        /// The underlying TOML error.
        source: toml::de::Error,
    },

    /// The server refused the login.
    #[error("Authorization failed for login {login} on {server}")]
    Rejected {
        /// Login id that was refused.
        login: u64,
        /// Server that refused it.
        server: String,
    },

    /// The terminal refused to start.
    #[error("Terminal initialization failed: {0}")]
    Init(String),

    /// A tick file is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A tick record could not be parsed.
    #[error("Invalid tick record at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ticks returned by a request together with the translated status.
#[derive(Debug, Clone, PartialEq)]
pub struct TickResponse {
    /// Status of the request.
    pub status: TerminalStatus,
    /// Ticks returned; empty unless `status` is ok.
    pub ticks: Vec<Tick>,
}

/// A trading terminal session.
///
/// Mirrors the vendor client surface: requests return plain values and the
/// outcome of the last request is read back with [`Terminal::last_error`].
pub trait Terminal {
    /// Starts the terminal and logs into the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be started or the login is refused.
    fn connect(&mut self, credentials: &Credentials) -> Result<(), TerminalError>;

    /// Returns the connected account's details.
    fn account_info(&self) -> Option<AccountInfo>;

    /// Returns every symbol the server exposes.
    fn symbols(&self) -> Vec<SymbolInfo>;

    /// Copies the ticks of `symbol` inside `range`.
    fn copy_ticks_range(&mut self, symbol: &str, range: &DateRange) -> Vec<Tick>;

    /// Returns the raw result code of the last request.
    fn last_error(&self) -> i32;

    /// Closes the session and stops the terminal.
    fn shutdown(&mut self);

    /// Copies ticks and translates the resulting status code.
    fn request_ticks(&mut self, symbol: &str, range: &DateRange) -> TickResponse {
        let ticks = self.copy_ticks_range(symbol, range);
        let status = TerminalStatus::from_code(self.last_error());
        let ticks = if status.is_ok() { ticks } else { Vec::new() };
        TickResponse { status, ticks }
    }
}

impl<T: Terminal + ?Sized> Terminal for Box<T> {
    fn connect(&mut self, credentials: &Credentials) -> Result<(), TerminalError> {
        (**self).connect(credentials)
    }

    fn account_info(&self) -> Option<AccountInfo> {
        (**self).account_info()
    }

    fn symbols(&self) -> Vec<SymbolInfo> {
        (**self).symbols()
    }

    fn copy_ticks_range(&mut self, symbol: &str, range: &DateRange) -> Vec<Tick> {
        (**self).copy_ticks_range(symbol, range)
    }

    fn last_error(&self) -> i32 {
        (**self).last_error()
    }

    fn shutdown(&mut self) {
        (**self).shutdown();
    }
}
