//! Static credential table.

use std::collections::BTreeMap;

use serde::Deserialize;
use tickgetter_types::Credentials;

use crate::SessionError;

/// Credentials keyed by a case-insensitive account name.
///
/// Deserializes from a map of tables, e.g. the `[accounts.<key>]` section
/// of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "BTreeMap<String, Credentials>")]
pub struct AccountBook {
    accounts: BTreeMap<String, Credentials>,
}

impl From<BTreeMap<String, Credentials>> for AccountBook {
    fn from(map: BTreeMap<String, Credentials>) -> Self {
        let mut book = Self::new();
        for (key, credentials) in map {
            book.insert(key, credentials);
        }
        book
    }
}

impl AccountBook {
    /// Creates an empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    /// Adds or replaces an account.
    pub fn insert(&mut self, key: impl AsRef<str>, credentials: Credentials) {
        self.accounts
            .insert(key.as_ref().to_lowercase(), credentials);
    }

    /// Looks up an account by key (case-insensitive).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Credentials> {
        self.accounts.get(&key.trim().to_lowercase())
    }

    /// Looks up an account, failing with [`SessionError::InvalidCredentials`].
    ///
    /// # Errors
    ///
    /// Returns an error if no account has this key.
    pub fn resolve(&self, key: &str) -> Result<&Credentials, SessionError> {
        self.get(key).ok_or_else(|| {
            tracing::error!(account = key, "unknown account");
            SessionError::InvalidCredentials(key.to_string())
        })
    }

    /// Returns the account keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    /// Returns all accounts in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Credentials)> {
        self.accounts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
