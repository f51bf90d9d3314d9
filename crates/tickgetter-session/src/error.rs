//! Session error types.

use thiserror::Error;
use tickgetter_terminal::TerminalError;
use tickgetter_types::DateRangeError;

/// Errors raised by login and fetch operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The account key does not resolve to any credentials.
    #[error("Unknown account: {0}")]
    InvalidCredentials(String),

    /// The terminal refused to connect.
    #[error("Failed to connect login {login}: {source}")]
    ConnectFailed {
        /// Login id used.
        login: u64,
        /// The underlying terminal error.
        source: TerminalError,
    },

    /// The server returned no symbols after login.
    #[error("Did not receive the symbol list from {company}")]
    NoSymbolsAvailable {
        /// Company reported by the terminal, if any.
        company: String,
    },

    /// An operation that needs a login was called without one.
    #[error("Not logged in")]
    NotAuthenticated,

    /// Invalid request window.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),
}
