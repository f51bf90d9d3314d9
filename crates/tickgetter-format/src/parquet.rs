//! Apache Parquet output format.

use std::io::Write;
use std::sync::Arc;

use arrow::array::{Float64Array, TimestampMillisecondArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tickgetter_types::Tick;

use crate::{FormatError, Formatter};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size. A size of zero is raised to one row.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = if size == 0 { 1 } else { size };
        self
    }

    /// Creates the Arrow schema for tick data.
    fn tick_schema() -> Schema {
        Schema::new(vec![
            Field::new(
                "timestamp",
                DataType::Timestamp(TimeUnit::Millisecond, Some("UTC".into())),
                false,
            ),
            Field::new("bid", DataType::Float64, false),
            Field::new("ask", DataType::Float64, false),
            Field::new("last", DataType::Float64, false),
            Field::new("volume", DataType::Float64, false),
            Field::new("flags", DataType::UInt32, false),
        ])
    }

    /// Converts ticks to an Arrow RecordBatch.
    fn ticks_to_batch(ticks: &[Tick]) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = ticks
            .iter()
            .map(|t| t.timestamp.timestamp_millis())
            .collect();
        let bids: Vec<_> = ticks.iter().map(|t| t.bid).collect();
        let asks: Vec<_> = ticks.iter().map(|t| t.ask).collect();
        let lasts: Vec<_> = ticks.iter().map(|t| t.last).collect();
        let volumes: Vec<_> = ticks.iter().map(|t| t.volume).collect();
        let flags: Vec<_> = ticks.iter().map(|t| t.flags).collect();

        RecordBatch::try_new(
            Arc::new(Self::tick_schema()),
            vec![
                Arc::new(TimestampMillisecondArray::from(timestamps).with_timezone("UTC")),
                Arc::new(Float64Array::from(bids)),
                Arc::new(Float64Array::from(asks)),
                Arc::new(Float64Array::from(lasts)),
                Arc::new(Float64Array::from(volumes)),
                Arc::new(UInt32Array::from(flags)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError> {
        let schema = Arc::new(Self::tick_schema());
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for chunk in ticks.chunks(self.row_group_size) {
            let batch = Self::ticks_to_batch(chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }
}
