//! Scripted in-process terminal.

use std::collections::HashMap;

use tickgetter_types::{AccountInfo, Credentials, DateRange, SymbolInfo, Tick};

use crate::status::{RES_E_NOT_FOUND, RES_E_TERMINAL_NOT_RUNNING, RES_S_OK};
use crate::{Terminal, TerminalError};

/// A terminal whose account, symbols and ticks are set up front.
///
/// Requests are recorded so callers can assert on the order in which
/// symbols were fetched.
#[derive(Debug, Clone, Default)]
pub struct MemoryTerminal {
    company: String,
    symbols: Vec<SymbolInfo>,
    ticks: HashMap<String, Vec<Tick>>,
    forced: HashMap<String, i32>,
    accepted_login: Option<u64>,
    refuse: bool,
    connected: bool,
    last_error: i32,
    requests: Vec<String>,
    shutdowns: usize,
}

impl MemoryTerminal {
    /// Creates an empty terminal for the given broker.
    #[must_use]
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            ..Self::default()
        }
    }

    /// Exposes a symbol under the given group path.
    #[must_use]
    pub fn with_symbol(mut self, path: impl Into<String>) -> Self {
        self.symbols.push(SymbolInfo::new(path));
        self
    }

    /// Stores ticks for a symbol (by name).
    #[must_use]
    pub fn with_ticks(mut self, symbol: impl Into<String>, ticks: Vec<Tick>) -> Self {
        self.ticks.insert(symbol.into(), ticks);
        self
    }

    /// Makes every request for `symbol` end with `code` and no ticks.
    #[must_use]
    pub fn with_status(mut self, symbol: impl Into<String>, code: i32) -> Self {
        self.forced.insert(symbol.into(), code);
        self
    }

    /// Accepts only the given login id.
    #[must_use]
    pub const fn accept_only(mut self, login: u64) -> Self {
        self.accepted_login = Some(login);
        self
    }

    /// Fails every connection attempt.
    #[must_use]
    pub const fn refuse_connections(mut self) -> Self {
        self.refuse = true;
        self
    }

    /// Returns true while a session is open.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Returns the symbols requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    /// Returns how many times the terminal was shut down.
    #[must_use]
    pub const fn shutdown_count(&self) -> usize {
        self.shutdowns
    }
}

impl Terminal for MemoryTerminal {
    fn connect(&mut self, credentials: &Credentials) -> Result<(), TerminalError> {
        if self.refuse {
            return Err(TerminalError::Init("connection refused".to_string()));
        }
        if self
            .accepted_login
            .is_some_and(|login| login != credentials.login)
        {
            return Err(TerminalError::Rejected {
                login: credentials.login,
                server: credentials.server.clone(),
            });
        }
        self.connected = true;
        self.last_error = RES_S_OK;
        Ok(())
    }

    fn account_info(&self) -> Option<AccountInfo> {
        self.connected.then(|| AccountInfo {
            company: self.company.clone(),
        })
    }

    fn symbols(&self) -> Vec<SymbolInfo> {
        if self.connected {
            self.symbols.clone()
        } else {
            Vec::new()
        }
    }

    fn copy_ticks_range(&mut self, symbol: &str, range: &DateRange) -> Vec<Tick> {
        self.requests.push(symbol.to_string());

        if !self.connected {
            self.last_error = RES_E_TERMINAL_NOT_RUNNING;
            return Vec::new();
        }
        if let Some(&code) = self.forced.get(symbol) {
            self.last_error = code;
            return Vec::new();
        }
        if !self.symbols.iter().any(|s| s.name() == symbol) {
            self.last_error = RES_E_NOT_FOUND;
            return Vec::new();
        }

        self.last_error = RES_S_OK;
        self.ticks
            .get(symbol)
            .map(|ticks| {
                ticks
                    .iter()
                    .filter(|t| range.contains(t.timestamp))
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn last_error(&self) -> i32 {
        self.last_error
    }

    fn shutdown(&mut self) {
        self.connected = false;
        self.shutdowns += 1;
    }
}
