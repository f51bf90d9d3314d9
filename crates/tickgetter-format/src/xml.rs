//! XML output format.

use std::io::Write;

use tickgetter_types::Tick;

use crate::{FormatError, Formatter, TIMESTAMP_FORMAT};

/// XML formatter producing `<data><row>...</row></data>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormatter;

impl XmlFormatter {
    /// Creates a new XML formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for XmlFormatter {
    fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[Tick],
        mut writer: W,
    ) -> Result<(), FormatError> {
        writeln!(writer, "<?xml version='1.0' encoding='utf-8'?>")?;
        writeln!(writer, "<data>")?;
        for (idx, tick) in ticks.iter().enumerate() {
            writeln!(writer, "  <row>")?;
            writeln!(writer, "    <index>{idx}</index>")?;
            writeln!(
                writer,
                "    <timestamp>{}</timestamp>",
                tick.timestamp.format(TIMESTAMP_FORMAT)
            )?;
            writeln!(writer, "    <bid>{}</bid>", tick.bid)?;
            writeln!(writer, "    <ask>{}</ask>", tick.ask)?;
            writeln!(writer, "    <last>{}</last>", tick.last)?;
            writeln!(writer, "    <volume>{}</volume>", tick.volume)?;
            writeln!(writer, "    <flags>{}</flags>", tick.flags)?;
            writeln!(writer, "  </row>")?;
        }
        writeln!(writer, "</data>")?;

        Ok(())
    }
}
