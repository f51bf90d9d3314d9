//! Offline terminal backed by a directory of tick files.
//!
//! Layout:
//!
//! ```text
//! <path>/terminal.toml        account and symbol manifest
//! <path>/ticks/<SYMBOL>.csv   timestamp,bid,ask,last,volume,flags
//! ```
//!
//! Timestamps are RFC 3339 strings or epoch milliseconds.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tickgetter_types::{AccountInfo, Credentials, DateRange, SymbolInfo, Tick};

use crate::status::{
    RES_E_FAIL, RES_E_NO_MEMORY, RES_E_NOT_FOUND, RES_E_TERMINAL_NOT_RUNNING, RES_S_OK,
};
use crate::{Terminal, TerminalError};

/// Manifest file name inside an archive.
const MANIFEST: &str = "terminal.toml";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Contents of `terminal.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveManifest {
    /// Broker company name.
    pub company: String,
    /// Login id accepted by this archive.
    pub login: u64,
    /// Server name accepted by this archive.
    pub server: String,
    /// Password accepted by this archive.
    pub password: String,
    /// Largest number of ticks a single request may return.
    #[serde(default)]
    pub max_ticks: Option<usize>,
    /// Symbol group paths.
    #[serde(default)]
    pub symbols: Vec<String>,
}

impl ArchiveManifest {
    /// Reads the manifest from an archive directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest is missing or malformed.
    pub fn load(root: &Path) -> Result<Self, TerminalError> {
        let path = root.join(MANIFEST);
        if !path.is_file() {
            return Err(TerminalError::MissingTerminal(root.to_path_buf()));
        }
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|source| TerminalError::Manifest { path, source })
    }
}

/// A terminal that serves ticks from files on disk.
#[derive(Debug, Default)]
pub struct ArchiveTerminal {
    session: Option<(PathBuf, ArchiveManifest)>,
    last_error: i32,
}

impl ArchiveTerminal {
    /// Creates a disconnected archive terminal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the archive directory of the open session.
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.session.as_ref().map(|(root, _)| root.as_path())
    }

    fn read_ticks(root: &Path, symbol: &str, range: &DateRange) -> Result<Vec<Tick>, TerminalError> {
        let path = root.join("ticks").join(format!("{symbol}.csv"));
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let content = fs::read(&path)?;
        let data = content.strip_prefix(UTF8_BOM).unwrap_or(&content);
        // The header row is optional, so it is detected by its first field
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .from_reader(data);

        let mut ticks = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            if idx == 0 && record.get(0) == Some("timestamp") {
                continue;
            }
            let tick = parse_tick(&record).map_err(|message| TerminalError::Parse {
                line: record.position().map_or(idx + 1, |pos| pos.line() as usize),
                message,
            })?;
            if range.contains(tick.timestamp) {
                ticks.push(tick);
            }
        }
        Ok(ticks)
    }
}

impl Terminal for ArchiveTerminal {
    fn connect(&mut self, credentials: &Credentials) -> Result<(), TerminalError> {
        let manifest = ArchiveManifest::load(&credentials.path)?;
        if manifest.login != credentials.login
            || manifest.server != credentials.server
            || manifest.password != credentials.password
        {
            return Err(TerminalError::Rejected {
                login: credentials.login,
                server: credentials.server.clone(),
            });
        }
        tracing::debug!(path = %credentials.path.display(), "opened tick archive");
        self.session = Some((credentials.path.clone(), manifest));
        self.last_error = RES_S_OK;
        Ok(())
    }

    fn account_info(&self) -> Option<AccountInfo> {
        self.session.as_ref().map(|(_, manifest)| AccountInfo {
            company: manifest.company.clone(),
        })
    }

    fn symbols(&self) -> Vec<SymbolInfo> {
        self.session
            .as_ref()
            .map(|(_, manifest)| manifest.symbols.iter().map(SymbolInfo::new).collect())
            .unwrap_or_default()
    }

    fn copy_ticks_range(&mut self, symbol: &str, range: &DateRange) -> Vec<Tick> {
        let Some((root, manifest)) = &self.session else {
            self.last_error = RES_E_TERMINAL_NOT_RUNNING;
            return Vec::new();
        };

        if !manifest
            .symbols
            .iter()
            .any(|path| SymbolInfo::new(path.as_str()).name() == symbol)
        {
            self.last_error = RES_E_NOT_FOUND;
            return Vec::new();
        }

        match Self::read_ticks(root, symbol, range) {
            Ok(ticks) if manifest.max_ticks.is_some_and(|max| ticks.len() > max) => {
                self.last_error = RES_E_NO_MEMORY;
                Vec::new()
            }
            Ok(ticks) => {
                self.last_error = RES_S_OK;
                ticks
            }
            Err(e) => {
                tracing::warn!(symbol, error = %e, "failed to read tick file");
                self.last_error = RES_E_FAIL;
                Vec::new()
            }
        }
    }

    fn last_error(&self) -> i32 {
        self.last_error
    }

    fn shutdown(&mut self) {
        self.session = None;
    }
}

/// Parses one `timestamp,bid,ask,last,volume,flags` record.
fn parse_tick(record: &StringRecord) -> Result<Tick, String> {
    if record.len() != 6 {
        return Err(format!("expected 6 fields, found {}", record.len()));
    }

    let timestamp = parse_timestamp(&record[0])?;
    let number = |idx: usize| {
        let value = record[idx]
            .parse::<f64>()
            .map_err(|e| format!("field {}: {e}", idx + 1))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("field {}: not a finite number", idx + 1))
        }
    };
    let flags = record[5]
        .parse::<u32>()
        .map_err(|e| format!("field 6: {e}"))?;

    Ok(Tick::new(timestamp, number(1)?, number(2)?)
        .with_deal(number(3)?, number(4)?)
        .with_flags(flags))
}

fn parse_timestamp(field: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(millis) = field.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| format!("timestamp out of range: {millis}"));
    }
    DateTime::parse_from_rfc3339(field)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("timestamp '{field}': {e}"))
}
