//! One-file-per-symbol export.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tickgetter_types::SymbolTicks;

use crate::{FormatError, OutputFormat};

/// Errors that can occur while exporting tick batches.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The format key does not name a supported format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The output directory could not be created.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Serializing a batch failed.
    #[error("Failed to write '{path}': {source}")]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying format error.
        source: FormatError,
    },

    /// The serializer returned but the file is not on disk.
    #[error("File was not saved: '{path}'")]
    SaveVerificationFailed {
        /// The expected file.
        path: PathBuf,
    },
}

/// Writes each tick batch to `<root>/ticks_<ext>/<symbol>_<broker>_<range>.<ext>`.
#[derive(Debug, Clone)]
pub struct ExportDispatcher {
    root: PathBuf,
    format: OutputFormat,
}

impl ExportDispatcher {
    /// Creates a dispatcher writing under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            root: root.into(),
            format,
        }
    }

    /// Creates a dispatcher from a format key such as `"csv"`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedFormat`] for unknown keys.
    pub fn from_key(root: impl Into<PathBuf>, key: &str) -> Result<Self, ExportError> {
        let format = key
            .parse::<OutputFormat>()
            .map_err(|_| ExportError::UnsupportedFormat(key.to_string()))?;
        Ok(Self::new(root, format))
    }

    /// Returns the output format.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns the directory files are written to.
    #[must_use]
    pub fn directory(&self) -> PathBuf {
        self.root.join(format!("ticks_{}", self.format.extension()))
    }

    /// Returns the file a batch is written to.
    #[must_use]
    pub fn path_for(&self, batch: &SymbolTicks) -> PathBuf {
        self.directory()
            .join(batch.file_name(self.format.extension()))
    }

    /// Writes every batch in order and returns the written paths.
    ///
    /// Stops at the first failure. Files written before the failure are
    /// left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created, a batch cannot be
    /// serialized, or a written file cannot be found afterwards.
    pub fn save(&self, batches: &[SymbolTicks]) -> Result<Vec<PathBuf>, ExportError> {
        batches.iter().map(|batch| self.save_one(batch)).collect()
    }

    /// Writes one batch and verifies the file exists.
    ///
    /// # Errors
    ///
    /// See [`ExportDispatcher::save`].
    pub fn save_one(&self, batch: &SymbolTicks) -> Result<PathBuf, ExportError> {
        let ext = self.format.extension();
        let directory = self.directory();
        fs::create_dir_all(&directory).map_err(|source| ExportError::CreateDir {
            path: directory.clone(),
            source,
        })?;

        let relative = self.path_for(batch);
        let path = std::path::absolute(&relative).unwrap_or(relative);

        tracing::info!(symbol = %batch.symbol, "Saving {} to .{ext}...", batch.symbol);
        if let Err(source) = self.write_file(batch, &path) {
            tracing::error!(path = %path.display(), error = %source, "ERROR while saving to .{ext}");
            return Err(ExportError::Write { path, source });
        }

        verify_saved(&path)?;
        tracing::info!(path = %path.display(), "Successfully saved {} to .{ext}", batch.symbol);
        Ok(path)
    }

    fn write_file(&self, batch: &SymbolTicks, path: &Path) -> Result<(), FormatError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.format.write_batch(batch, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Checks that a file is present on disk after a save.
fn verify_saved(path: &Path) -> Result<(), ExportError> {
    if path.is_file() {
        Ok(())
    } else {
        tracing::error!(path = %path.display(), "saved file not found on disk");
        Err(ExportError::SaveVerificationFailed {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_ticks;
    use chrono::NaiveDate;
    use tickgetter_types::DateRange;

    fn batch(symbol: &str, n: usize) -> SymbolTicks {
        let range = DateRange::from_dates(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
        .unwrap();
        SymbolTicks::new(symbol, create_test_ticks(n), range, "DemoBroker")
    }

    #[test]
    fn test_paths() {
        let dispatcher = ExportDispatcher::new("/data", OutputFormat::Xlsx);
        assert_eq!(dispatcher.directory(), PathBuf::from("/data/ticks_xlsx"));
        assert_eq!(
            dispatcher.path_for(&batch("EURUSD", 0)),
            PathBuf::from("/data/ticks_xlsx/EURUSD_DemoBroker_2024_1_1_2024_2_1.xlsx")
        );
    }

    #[test]
    fn test_from_key_rejects_unknown() {
        let err = ExportDispatcher::from_key("/data", "pdf").unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(ref key) if key == "pdf"));
    }

    #[test]
    fn test_save_writes_one_file_per_batch() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = ExportDispatcher::new(dir.path(), OutputFormat::Csv);

        let paths = dispatcher
            .save(&[batch("EURUSD", 3), batch("GBPUSD", 2)])
            .unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.is_absolute() && p.is_file()));
        let csv = fs::read_to_string(&paths[0]).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(
            paths[1]
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("GBPUSD_DemoBroker_")
        );
    }

    #[test]
    fn test_save_every_format() {
        let dir = tempfile::tempdir().unwrap();
        for format in OutputFormat::all() {
            let dispatcher = ExportDispatcher::new(dir.path(), *format);
            let paths = dispatcher.save(&[batch("EURUSD", 5)]).unwrap();
            assert_eq!(paths.len(), 1);
            assert!(
                dir.path()
                    .join(format!("ticks_{format}"))
                    .join(format!("EURUSD_DemoBroker_2024_1_1_2024_2_1.{format}"))
                    .is_file()
            );
        }
    }

    #[test]
    fn test_csv_round_trip_rows_and_columns() {
        let dir = tempfile::tempdir().unwrap();
        let original = batch("EURUSD", 7);
        let path = ExportDispatcher::new(dir.path(), OutputFormat::Csv)
            .save_one(&original)
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        let header: Vec<_> = lines.next().unwrap().split(',').collect();
        assert_eq!(header, tickgetter_types::Tick::COLUMNS);
        assert_eq!(lines.count(), original.len());
    }

    #[test]
    fn test_save_fails_when_directory_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ticks_json"), b"in the way").unwrap();
        let dispatcher = ExportDispatcher::new(dir.path(), OutputFormat::Json);

        let err = dispatcher.save(&[batch("EURUSD", 1)]).unwrap_err();
        assert!(matches!(err, ExportError::CreateDir { .. }));
    }

    #[test]
    fn test_save_stops_at_failing_batch() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = ExportDispatcher::new(dir.path(), OutputFormat::Csv);
        let batches = [batch("EURUSD", 2), batch("EUR/USD", 2), batch("GBPUSD", 2)];

        let err = dispatcher.save(&batches).unwrap_err();

        // The separator in the symbol points into a directory that does not exist
        assert!(matches!(err, ExportError::Write { ref path, .. } if path.ends_with("EUR/USD_DemoBroker_2024_1_1_2024_2_1.csv")));
        assert!(dispatcher.path_for(&batches[0]).is_file());
        assert!(!dispatcher.path_for(&batches[2]).exists());
    }

    #[test]
    fn test_verify_saved() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        assert!(matches!(
            verify_saved(&missing),
            Err(ExportError::SaveVerificationFailed { .. })
        ));
        fs::write(&missing, b"").unwrap();
        assert!(verify_saved(&missing).is_ok());
    }
}
