//! Account credentials and terminal metadata.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Static login record for one terminal account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Display name shown to the user.
    pub name: String,
    /// Account login id.
    pub login: u64,
    /// Account password.
    pub password: String,
    /// Trade server host.
    pub server: String,
    /// Terminal install (or archive) path.
    pub path: PathBuf,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("login", &self.login)
            .field("password", &"***")
            .field("server", &self.server)
            .field("path", &self.path)
            .finish()
    }
}

/// Account details reported by a connected terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Brokerage company name.
    pub company: String,
}

/// A symbol exposed by the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolInfo {
    /// Backslash-separated group path ending in the symbol name,
    /// e.g. `Forex\Majors\EURUSD`.
    pub path: String,
}

impl SymbolInfo {
    /// Creates a symbol from its group path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the last path component, the tradable symbol name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('\\').next().unwrap_or(&self.path)
    }
}
