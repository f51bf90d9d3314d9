//! CSV output format.

use std::io::Write;

use tickgetter_types::Tick;

use crate::{FormatError, Formatter, TIMESTAMP_FORMAT};

/// CSV formatter.
///
/// Writes a header row followed by one comma-separated row per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    /// Creates a new CSV formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for CsvFormatter {
    fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[Tick],
        mut writer: W,
    ) -> Result<(), FormatError> {
        writeln!(writer, "{}", Tick::COLUMNS.join(","))?;

        for tick in ticks {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                tick.timestamp.format(TIMESTAMP_FORMAT),
                tick.bid,
                tick.ask,
                tick.last,
                tick.volume,
                tick.flags
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_tick, create_test_ticks};
    use std::io::Cursor;

    #[test]
    fn test_csv_ticks() {
        let formatter = CsvFormatter::new();
        let ticks = vec![create_test_tick()];
        let mut output = Cursor::new(Vec::new());

        formatter.write_ticks(&ticks, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("timestamp,bid,ask,last,volume,flags\n"));
        assert!(result.contains("2024-01-15T12:30:45.000Z"));
        assert!(result.contains("1.1001"));
    }

    #[test]
    fn test_csv_rows_match_columns() {
        let ticks = create_test_ticks(4);
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::new().write_ticks(&ticks, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 5);
        let header: Vec<_> = lines[0].split(',').collect();
        assert_eq!(header, Tick::COLUMNS);
        assert!(lines[1..].iter().all(|l| l.split(',').count() == 6));
    }
}
