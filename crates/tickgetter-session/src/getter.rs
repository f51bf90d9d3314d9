//! Top-level tick getter.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tickgetter_format::{ExportDispatcher, ExportError};
use tickgetter_terminal::Terminal;
use tickgetter_types::{Credentials, DateRange, SymbolTicks};

use crate::{AccountBook, FetchOutcome, FetchRun, FetchSummary, Session, SessionError};

/// Owns a session, the request window and the fetched batches.
///
/// Batches accumulate across fetch runs until exported.
#[derive(Debug)]
pub struct TickGetter<T: Terminal> {
    session: Session<T>,
    range: DateRange,
    collected: Vec<SymbolTicks>,
    not_found: Vec<String>,
}

impl<T: Terminal> TickGetter<T> {
    /// Creates a getter over a disconnected terminal with the default window.
    pub fn new(terminal: T) -> Self {
        Self {
            session: Session::new(terminal),
            range: DateRange::default(),
            collected: Vec::new(),
            not_found: Vec::new(),
        }
    }

    /// Sets the request window.
    #[must_use]
    pub const fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Replaces the request window.
    pub const fn set_range(&mut self, range: DateRange) {
        self.range = range;
    }

    /// Replaces the request window with `[from, to)` at midnight UTC.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DateRange`] unless `from` is before `to`.
    pub fn set_dates(&mut self, from: NaiveDate, to: NaiveDate) -> Result<(), SessionError> {
        self.range = DateRange::from_dates(from, to)?;
        Ok(())
    }

    /// Returns the request window.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// Logs into an account. See [`Session::login`].
    ///
    /// # Errors
    ///
    /// Propagates the session's login errors.
    pub fn login(&mut self, credentials: &Credentials) -> Result<(), SessionError> {
        self.session.login(credentials)
    }

    /// Logs into the account stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidCredentials`] for an unknown key, or
    /// any login error.
    pub fn login_key(&mut self, accounts: &AccountBook, key: &str) -> Result<(), SessionError> {
        let credentials = accounts.resolve(key)?;
        self.session.login(credentials)
    }

    /// Closes the terminal connection.
    pub fn close_connection(&mut self) {
        self.session.close_connection();
    }

    /// Returns the session.
    #[must_use]
    pub const fn session(&self) -> &Session<T> {
        &self.session
    }

    /// Starts a fetch run over `symbols` without touching the accumulated
    /// batches.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when not logged in.
    pub fn fetch<S: AsRef<str>>(&mut self, symbols: &[S]) -> Result<FetchRun<'_, T>, SessionError> {
        start_run(&mut self.session, symbols, self.range)
    }

    /// Fetches every valid symbol and appends the batches to the
    /// accumulated list.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when not logged in.
    pub fn get_ticks<S: AsRef<str>>(&mut self, symbols: &[S]) -> Result<FetchSummary, SessionError> {
        self.get_ticks_with(symbols, |_| {})
    }

    /// Like [`TickGetter::get_ticks`], calling `on_outcome` after each symbol.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when not logged in.
    pub fn get_ticks_with<S, F>(
        &mut self,
        symbols: &[S],
        mut on_outcome: F,
    ) -> Result<FetchSummary, SessionError>
    where
        S: AsRef<str>,
        F: FnMut(&FetchOutcome),
    {
        let mut run = start_run(&mut self.session, symbols, self.range)?;
        let mut summary = FetchSummary {
            requested: run.len(),
            ..FetchSummary::default()
        };

        for outcome in run.by_ref() {
            on_outcome(&outcome);
            if let FetchOutcome::Fetched(batch) = outcome {
                summary.fetched += 1;
                summary.ticks += batch.len();
                self.collected.push(batch);
            }
        }

        let (rejected, not_found, skipped) = run.into_lists();
        self.not_found.clone_from(&not_found);
        summary.rejected = rejected;
        summary.not_found = not_found;
        summary.skipped = skipped;
        Ok(summary)
    }

    /// Returns the batches fetched since the last export.
    #[must_use]
    pub fn collected(&self) -> &[SymbolTicks] {
        &self.collected
    }

    /// Returns the symbols not found by the last fetch run.
    #[must_use]
    pub fn not_found(&self) -> &[String] {
        &self.not_found
    }

    /// Writes every accumulated batch through `dispatcher`.
    ///
    /// The accumulated list is cleared only if every file was written.
    ///
    /// # Errors
    ///
    /// Returns the first export failure.
    pub fn export(&mut self, dispatcher: &ExportDispatcher) -> Result<Vec<PathBuf>, ExportError> {
        if self.collected.is_empty() {
            tracing::info!("No ticks to save");
            return Ok(Vec::new());
        }
        let paths = dispatcher.save(&self.collected)?;
        self.collected.clear();
        Ok(paths)
    }

    /// Writes every accumulated batch under `root` in the format named by
    /// `format_key` (e.g. `"csv"`).
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedFormat`] for an unknown key, before
    /// any directory is created, or the first export failure.
    pub fn save_ticks_to_file(
        &mut self,
        root: impl AsRef<Path>,
        format_key: &str,
    ) -> Result<Vec<PathBuf>, ExportError> {
        let dispatcher = ExportDispatcher::from_key(root.as_ref(), format_key).inspect_err(|_| {
            tracing::error!("Unsupported format: {format_key}");
        })?;
        self.export(&dispatcher)
    }
}

fn start_run<'a, T: Terminal, S: AsRef<str>>(
    session: &'a mut Session<T>,
    symbols: &[S],
    range: DateRange,
) -> Result<FetchRun<'a, T>, SessionError> {
    if !session.is_authorized() {
        tracing::error!("Not logged in, can't fetch ticks");
        return Err(SessionError::NotAuthenticated);
    }

    let (queue, rejected) = session.partition_symbols(symbols);
    Ok(FetchRun::new(session, queue, rejected, range))
}
