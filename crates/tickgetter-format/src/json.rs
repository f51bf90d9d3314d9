//! JSON output format.

use std::io::Write;

use tickgetter_types::Tick;

use crate::{FormatError, Formatter};

/// JSON formatter writing a compact array of tick records.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[Tick],
        mut writer: W,
    ) -> Result<(), FormatError> {
        serde_json::to_writer(&mut writer, ticks)?;
        writeln!(writer)?;
        Ok(())
    }
}
