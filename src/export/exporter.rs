use crate::error::{Result, SheetSplitError};
use crate::export::{FilenameRegistry, OutputFolder, OutputRecord};
use crate::sheet::SheetRow;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// What happened to one data row.
#[derive(Debug)]
pub enum RowOutcome {
    Written {
        /// 1-based count of successful rows so far
        counter: usize,
        row: usize,
        filename: String,
        path: PathBuf,
        bytes: usize,
    },
    Failed {
        row: usize,
        filename: String,
        error: SheetSplitError,
    },
}

impl RowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RowOutcome::Written { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowFailure {
    pub row: usize,
    pub filename: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub output_folder: PathBuf,
    pub rows_written: usize,
    pub failures: Vec<RowFailure>,
    pub elapsed: Duration,
    pub dry_run: bool,
}

impl ExportReport {
    pub fn rows_processed(&self) -> usize {
        self.rows_written + self.failures.len()
    }
}

/// Writes one file per data row, enforcing filename uniqueness for the run.
pub struct RowExporter {
    registry: FilenameRegistry,
    written: usize,
    dry_run: bool,
}

impl RowExporter {
    pub fn new() -> Self {
        Self {
            registry: FilenameRegistry::new(),
            written: 0,
            dry_run: false,
        }
    }

    /// Validate and report without touching the filesystem.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn registry(&self) -> &FilenameRegistry {
        &self.registry
    }

    /// Export `rows` (header already removed) into `folder`.
    ///
    /// `on_row` sees every outcome before the next row is touched. A write
    /// failure is reported and skipped; a duplicate filename stops the run
    /// with [`SheetSplitError::DuplicateFilename`], leaving files already
    /// written in place.
    pub fn export<F>(
        &mut self,
        rows: &[SheetRow],
        folder: &OutputFolder,
        mut on_row: F,
    ) -> Result<ExportReport>
    where
        F: FnMut(&RowOutcome),
    {
        let start_time = Instant::now();
        let mut failures = Vec::new();

        for row in rows {
            let record = OutputRecord::from_row(row);

            if !self.registry.insert(&record.filename) {
                warn!(row = record.row, filename = %record.filename, "duplicate filename");
                return Err(SheetSplitError::DuplicateFilename {
                    name: record.filename,
                });
            }

            let path = folder.file_path(&record.filename);
            let outcome = match self.write_record(&record, &path) {
                Ok(()) => {
                    self.written += 1;
                    RowOutcome::Written {
                        counter: self.written,
                        row: record.row,
                        bytes: record.content.len(),
                        filename: record.filename,
                        path,
                    }
                }
                Err(source) => {
                    let error = SheetSplitError::RowWrite {
                        row: record.row,
                        path,
                        source,
                    };
                    failures.push(RowFailure {
                        row: record.row,
                        filename: record.filename.clone(),
                        message: error.to_string(),
                    });
                    RowOutcome::Failed {
                        row: record.row,
                        filename: record.filename,
                        error,
                    }
                }
            };

            on_row(&outcome);
        }

        Ok(ExportReport {
            output_folder: folder.path().to_path_buf(),
            rows_written: self.written,
            failures,
            elapsed: start_time.elapsed(),
            dry_run: self.dry_run,
        })
    }

    fn write_record(&self, record: &OutputRecord, path: &Path) -> std::io::Result<()> {
        if self.dry_run {
            return Ok(());
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(record.content.as_bytes())?;
        writer.flush()?;

        debug!(row = record.row, path = %path.display(), bytes = record.content.len(), "wrote row");
        Ok(())
    }
}

impl Default for RowExporter {
    fn default() -> Self {
        Self::new()
    }
}
