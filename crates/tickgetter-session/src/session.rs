//! Terminal connection state and symbol validation.

use std::collections::{BTreeSet, HashSet};

use tickgetter_terminal::Terminal;
use tickgetter_types::{Credentials, SymbolInfo, broker_label};

use crate::SessionError;

/// Connection state over one terminal.
///
/// At most one login is live at a time: logging in again closes the
/// previous connection first.
#[derive(Debug)]
pub struct Session<T: Terminal> {
    terminal: T,
    /// Logged in with a non-empty symbol list.
    authorized: bool,
    /// The terminal connection is open (possibly without symbols).
    connected: bool,
    company: Option<String>,
    /// Full symbol paths from the last successful refresh.
    paths: BTreeSet<String>,
    /// Leaf names of `paths`.
    names: HashSet<String>,
}

impl<T: Terminal> Session<T> {
    /// Creates a disconnected session.
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            authorized: false,
            connected: false,
            company: None,
            paths: BTreeSet::new(),
            names: HashSet::new(),
        }
    }

    /// Connects and logs into the account, then loads the account details.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectFailed`] if the terminal refuses the
    /// connection and [`SessionError::NoSymbolsAvailable`] if the server
    /// lists no symbols. The session is not authorized after either.
    pub fn login(&mut self, credentials: &Credentials) -> Result<(), SessionError> {
        if self.authorized || self.connected {
            self.close_connection();
        }

        tracing::info!("Launching terminal at {} ...", credentials.path.display());
        if let Err(source) = self.terminal.connect(credentials) {
            tracing::error!(login = credentials.login, error = %source, "Invalid login credentials");
            self.authorized = false;
            return Err(SessionError::ConnectFailed {
                login: credentials.login,
                source,
            });
        }
        self.connected = true;

        if !self.refresh_account_info() {
            self.authorized = false;
            return Err(SessionError::NoSymbolsAvailable {
                company: self.company.clone().unwrap_or_default(),
            });
        }

        self.authorized = true;
        tracing::info!(
            "Connected to {} (login: {})",
            self.company.as_deref().unwrap_or_default(),
            credentials.login
        );
        Ok(())
    }

    /// Reloads the company name and the symbol list from the terminal.
    ///
    /// Returns true if the terminal listed at least one symbol.
    pub fn refresh_account_info(&mut self) -> bool {
        self.company = self.terminal.account_info().map(|info| info.company);

        let symbols = self.terminal.symbols();
        self.names = symbols.iter().map(|s| s.name().to_string()).collect();
        self.paths = symbols.into_iter().map(|s| s.path).collect();

        if self.paths.is_empty() {
            tracing::error!("Did not receive the symbol list from the server");
            return false;
        }
        tracing::info!(count = self.paths.len(), "Got symbol list from the server");
        true
    }

    /// Closes the connection and forgets the account details.
    ///
    /// Logs a warning and does nothing when no connection is open.
    pub fn close_connection(&mut self) {
        if !(self.authorized || self.connected) {
            tracing::warn!("Connection was not established");
            return;
        }

        self.paths.clear();
        self.names.clear();
        self.company = None;
        tracing::info!("Closing connection ...");
        self.terminal.shutdown();
        self.authorized = false;
        self.connected = false;
        tracing::info!("Connection closed");
    }

    /// Returns true once logged in with a non-empty symbol list.
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Returns the company reported at login.
    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Returns the company name without whitespace, for file names.
    #[must_use]
    pub fn broker(&self) -> String {
        self.company.as_deref().map(broker_label).unwrap_or_default()
    }

    /// Returns the known symbols as full paths, sorted.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolInfo> + '_ {
        self.paths.iter().map(SymbolInfo::new)
    }

    /// Returns true if the symbol (leaf name or full path) is known.
    ///
    /// Logs a warning when it is not, or when no symbols are known at all.
    #[must_use]
    pub fn is_valid_symbol(&self, symbol: &str) -> bool {
        if self.paths.is_empty() {
            tracing::warn!(symbol, "No symbols received from the server");
            return false;
        }
        if !(self.names.contains(symbol) || self.paths.contains(symbol)) {
            tracing::warn!(
                "{symbol} is not in the list of symbols from {} server",
                self.company.as_deref().unwrap_or("the")
            );
            return false;
        }
        true
    }

    /// Returns the known symbols of `symbols`, in input order.
    ///
    /// Full paths are reduced to their leaf name. Duplicates are kept.
    #[must_use]
    pub fn validate_symbols<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<String> {
        self.partition_symbols(symbols).0
    }

    /// Splits `symbols` into known leaf names and rejected inputs.
    ///
    /// Both lists keep input order. Each unknown symbol is logged once.
    #[must_use]
    pub fn partition_symbols<S: AsRef<str>>(&self, symbols: &[S]) -> (Vec<String>, Vec<String>) {
        let mut valid = Vec::new();
        let mut rejected = Vec::new();
        for symbol in symbols.iter().map(AsRef::as_ref) {
            if self.is_valid_symbol(symbol) {
                valid.push(SymbolInfo::new(symbol).name().to_string());
            } else {
                rejected.push(symbol.to_string());
            }
        }
        (valid, rejected)
    }

    /// Returns the terminal.
    #[must_use]
    pub const fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Returns the terminal mutably.
    pub const fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }
}

impl<T: Terminal> Drop for Session<T> {
    fn drop(&mut self) {
        if self.connected {
            self.terminal.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tickgetter_terminal::MemoryTerminal;

    fn credentials(login: u64) -> Credentials {
        Credentials {
            name: "Demo".to_string(),
            login,
            password: "secret".to_string(),
            server: "Demo-Server".to_string(),
            path: PathBuf::from("memory"),
        }
    }

    fn terminal() -> MemoryTerminal {
        MemoryTerminal::new("Demo Broker Ltd")
            .with_symbol("Forex\\Majors\\EURUSD")
            .with_symbol("Forex\\Majors\\GBPUSD")
            .with_symbol("Metals\\XAUUSD")
    }

    #[test]
    fn test_login_populates_state() {
        let mut session = Session::new(terminal());
        session.login(&credentials(1)).unwrap();

        assert!(session.is_authorized());
        assert_eq!(session.company(), Some("Demo Broker Ltd"));
        assert_eq!(session.broker(), "DemoBrokerLtd");
        assert_eq!(session.symbols().count(), 3);
    }

    #[test]
    fn test_login_failure_leaves_unauthorized() {
        let mut session = Session::new(terminal().refuse_connections());
        let err = session.login(&credentials(1)).unwrap_err();

        assert!(matches!(err, SessionError::ConnectFailed { login: 1, .. }));
        assert!(!session.is_authorized());
        assert_eq!(session.company(), None);
    }

    #[test]
    fn test_login_without_symbols() {
        let mut session = Session::new(MemoryTerminal::new("Empty Broker"));
        let err = session.login(&credentials(1)).unwrap_err();

        assert!(matches!(err, SessionError::NoSymbolsAvailable { ref company } if company == "Empty Broker"));
        assert!(!session.is_authorized());
        // The connection itself is still open until closed
        assert!(session.terminal().is_connected());
        session.close_connection();
        assert!(!session.terminal().is_connected());
    }

    #[test]
    fn test_relogin_closes_previous_connection() {
        let mut session = Session::new(terminal());
        session.login(&credentials(1)).unwrap();
        session.login(&credentials(2)).unwrap();

        assert_eq!(session.terminal().shutdown_count(), 1);
        assert!(session.is_authorized());
    }

    #[test]
    fn test_close_connection_clears_state() {
        let mut session = Session::new(terminal());
        session.login(&credentials(1)).unwrap();
        session.close_connection();

        assert!(!session.is_authorized());
        assert_eq!(session.company(), None);
        assert_eq!(session.symbols().count(), 0);
        assert!(!session.terminal().is_connected());

        // Second close is a warning only
        session.close_connection();
        assert_eq!(session.terminal().shutdown_count(), 1);
    }

    #[test]
    fn test_is_valid_symbol() {
        let mut session = Session::new(terminal());
        assert!(!session.is_valid_symbol("EURUSD"));

        session.login(&credentials(1)).unwrap();
        assert!(session.is_valid_symbol("EURUSD"));
        assert!(session.is_valid_symbol("Metals\\XAUUSD"));
        assert!(!session.is_valid_symbol("BOGUSXYZ"));
        assert!(!session.is_valid_symbol("eurusd"));
    }

    #[test]
    fn test_validate_symbols_is_ordered_subsequence() {
        let mut session = Session::new(terminal());
        session.login(&credentials(1)).unwrap();

        let input = ["XAUUSD", "BOGUS", "EURUSD", "XAUUSD", "Forex\\Majors\\GBPUSD", "NOPE"];
        let valid = session.validate_symbols(&input);

        assert_eq!(valid, ["XAUUSD", "EURUSD", "XAUUSD", "GBPUSD"]);
    }

    #[test]
    fn test_partition_symbols_keeps_rejected() {
        let mut session = Session::new(terminal());
        session.login(&credentials(1)).unwrap();

        let input = ["BOGUS", "Forex\\Majors\\GBPUSD", "eurusd", "EURUSD"];
        let (valid, rejected) = session.partition_symbols(&input);

        assert_eq!(valid, ["GBPUSD", "EURUSD"]);
        assert_eq!(rejected, ["BOGUS", "eurusd"]);
        assert_eq!(session.validate_symbols(&input), valid);
    }

    #[test]
    fn test_validate_symbols_without_login_is_empty() {
        let session = Session::new(terminal());
        assert!(session.validate_symbols(&["EURUSD"]).is_empty());
    }
}
