//! Output format abstraction.

use std::io::Write;

use thiserror::Error;
use tickgetter_types::{SymbolTicks, Tick};

use crate::{CsvFormatter, HtmlFormatter, JsonFormatter, XlsxFormatter, XmlFormatter};

/// Output format identifier.
///
/// The set is closed: every variant is bound to exactly one formatter in
/// [`OutputFormat::write_batch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Apache Parquet, the binary columnar format.
    Parquet,
    /// CSV format.
    #[default]
    Csv,
    /// HTML table.
    Html,
    /// JSON array of records.
    Json,
    /// XML document.
    Xml,
    /// Spreadsheet workbook.
    Xlsx,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
            Self::Html => "html",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Xlsx => "xlsx",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Parquet,
            Self::Csv,
            Self::Html,
            Self::Json,
            Self::Xml,
            Self::Xlsx,
        ]
    }

    /// Returns the other keys that parse to this format.
    ///
    /// Files are always written under the canonical [`extension`](Self::extension),
    /// so `pkl` writes `ticks_parquet/*.parquet`.
    #[must_use]
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Parquet => &["pq", "pkl", "pickle"],
            Self::Html => &["htm"],
            Self::Xlsx => &["excel"],
            Self::Csv | Self::Json | Self::Xml => &[],
        }
    }

    /// Writes a symbol's ticks with the formatter bound to this format.
    ///
    /// The HTML caption and the worksheet name carry the symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_batch<W: Write + Send>(
        &self,
        batch: &SymbolTicks,
        writer: W,
    ) -> Result<(), FormatError> {
        let ticks = &batch.ticks;
        match self {
            Self::Parquet => write_parquet(ticks, writer),
            Self::Csv => CsvFormatter::new().write_ticks(ticks, writer),
            Self::Html => HtmlFormatter::new()
                .with_caption(&batch.symbol)
                .write_ticks(ticks, writer),
            Self::Json => JsonFormatter::new().write_ticks(ticks, writer),
            Self::Xml => XmlFormatter::new().write_ticks(ticks, writer),
            Self::Xlsx => XlsxFormatter::new()
                .with_sheet_name(&batch.symbol)
                .write_ticks(ticks, writer),
        }
    }
}

#[cfg(feature = "parquet")]
fn write_parquet<W: Write + Send>(ticks: &[Tick], writer: W) -> Result<(), FormatError> {
    crate::ParquetFormatter::new().write_ticks(ticks, writer)
}

#[cfg(not(feature = "parquet"))]
fn write_parquet<W: Write + Send>(_ticks: &[Tick], _writer: W) -> Result<(), FormatError> {
    Err(FormatError::Parquet(
        "Parquet support not compiled in".to_string(),
    ))
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parquet" | "pq" | "pkl" | "pickle" => Ok(Self::Parquet),
            "csv" => Ok(Self::Csv),
            "html" | "htm" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet container error.
    #[error("Spreadsheet error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes tick data to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError>;
}
