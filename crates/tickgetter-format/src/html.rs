//! HTML table output format.

use std::io::Write;

use tickgetter_types::Tick;

use crate::{FormatError, Formatter, TIMESTAMP_FORMAT, escape_markup};

/// HTML formatter producing a single `<table>` with a row index column.
#[derive(Debug, Clone, Default)]
pub struct HtmlFormatter {
    /// Optional table caption.
    caption: Option<String>,
}

impl HtmlFormatter {
    /// Creates a new HTML formatter without a caption.
    #[must_use]
    pub const fn new() -> Self {
        Self { caption: None }
    }

    /// Sets the table caption, usually the symbol the ticks belong to.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

impl Formatter for HtmlFormatter {
    fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[Tick],
        mut writer: W,
    ) -> Result<(), FormatError> {
        writeln!(writer, "<table border=\"1\" class=\"dataframe\">")?;
        if let Some(caption) = &self.caption {
            writeln!(writer, "  <caption>{}</caption>", escape_markup(caption))?;
        }

        writeln!(writer, "  <thead>")?;
        writeln!(writer, "    <tr style=\"text-align: right;\">")?;
        writeln!(writer, "      <th></th>")?;
        for column in Tick::COLUMNS {
            writeln!(writer, "      <th>{column}</th>")?;
        }
        writeln!(writer, "    </tr>\n  </thead>")?;

        writeln!(writer, "  <tbody>")?;
        for (idx, tick) in ticks.iter().enumerate() {
            writeln!(writer, "    <tr>")?;
            writeln!(writer, "      <th>{idx}</th>")?;
            writeln!(
                writer,
                "      <td>{}</td>",
                tick.timestamp.format(TIMESTAMP_FORMAT)
            )?;
            writeln!(writer, "      <td>{}</td>", tick.bid)?;
            writeln!(writer, "      <td>{}</td>", tick.ask)?;
            writeln!(writer, "      <td>{}</td>", tick.last)?;
            writeln!(writer, "      <td>{}</td>", tick.volume)?;
            writeln!(writer, "      <td>{}</td>", tick.flags)?;
            writeln!(writer, "    </tr>")?;
        }
        writeln!(writer, "  </tbody>\n</table>")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_ticks;
    use std::io::Cursor;

    #[test]
    fn test_html_table() {
        let ticks = create_test_ticks(3);
        let mut output = Cursor::new(Vec::new());

        HtmlFormatter::new().write_ticks(&ticks, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("<table"));
        assert!(result.trim_end().ends_with("</table>"));
        for column in Tick::COLUMNS {
            assert!(result.contains(&format!("<th>{column}</th>")));
        }
        // Header row plus one row per tick
        assert_eq!(result.matches("<tr").count(), 4);
        assert!(result.contains("<td>2024-01-15T12:30:45.250Z</td>"));
    }

    #[test]
    fn test_html_caption_is_escaped() {
        let mut output = Cursor::new(Vec::new());

        HtmlFormatter::new()
            .with_caption("S&P <500>")
            .write_ticks(&[], &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("<caption>S&amp;P &lt;500&gt;</caption>"));
    }
}
