//! Output formatters and file export for the tickgetter tick exporter.
//!
//! This crate provides formatters for writing tick data to the supported
//! output formats, and the dispatcher that writes one file per symbol:
//!
//! - [`CsvFormatter`] - CSV format
//! - [`HtmlFormatter`] - HTML table
//! - [`JsonFormatter`] - JSON array of records
//! - [`XmlFormatter`] - XML document with one element per row
//! - [`XlsxFormatter`] - Single-sheet spreadsheet workbook
//! - [`ParquetFormatter`] - Apache Parquet columnar format
//! - [`ExportDispatcher`] - Writes `ticks_<format>/<symbol>_...` files

#![doc(issue_tracker_base_url = "https://github.com/rockkley/tickgetter/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod export;
mod formatter;
mod html;
mod json;
mod xlsx;
mod xml;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use export::{ExportDispatcher, ExportError};
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use xlsx::XlsxFormatter;
pub use xml::XmlFormatter;

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;

/// Timestamp layout used by the text formats.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Escapes text for inclusion in HTML or XML.
pub(crate) fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};
    use tickgetter_types::Tick;

    pub(crate) fn create_test_tick() -> Tick {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45).unwrap();
        Tick::new(timestamp, 1.1000, 1.1001)
            .with_deal(1.10005, 2.0)
            .with_flags(6)
    }

    pub(crate) fn create_test_ticks(n: usize) -> Vec<Tick> {
        (0..n)
            .map(|i| {
                let mut tick = create_test_tick();
                tick.timestamp += chrono::TimeDelta::milliseconds(i as i64 * 250);
                tick
            })
            .collect()
    }
}
