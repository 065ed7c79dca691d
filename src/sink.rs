//! Table serialization
//!
//! [`RecordSink`] is the seam between extraction and output. [`CsvSink`]
//! writes one UTF-8 CSV per table: a header row of column names followed by
//! one line per record, `\n` terminated, quoting only where needed.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ConvertError;
use crate::record::Table;

/// What a sink reports after writing a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub bytes: u64,
}

impl WriteSummary {
    /// File size in kilobytes
    pub fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

/// Destination for extracted tables
pub trait RecordSink {
    /// Persist one table
    ///
    /// A failure concerns this table only; callers may keep writing others.
    fn write(&mut self, table: &Table) -> Result<WriteSummary, ConvertError>;
}

/// Writes each table to `<output_dir>/<kind file name>`
#[derive(Debug, Clone)]
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn ensure_output_dir(&self) -> Result<(), ConvertError> {
        if self.output_dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.output_dir).map_err(|e| ConvertError::Write {
            path: self.output_dir.display().to_string(),
            reason: e.to_string(),
        })?;
        info!(path = %self.output_dir.display(), "created output directory");
        Ok(())
    }
}

impl RecordSink for CsvSink {
    fn write(&mut self, table: &Table) -> Result<WriteSummary, ConvertError> {
        self.ensure_output_dir()?;

        let path = self.output_dir.join(table.kind().file_name());
        let write_error = |reason: String| ConvertError::Write {
            path: path.display().to_string(),
            reason,
        };

        let file = File::create(&path).map_err(|e| write_error(e.to_string()))?;
        write_csv(table, BufWriter::new(file)).map_err(|e| write_error(e.to_string()))?;
        let bytes = fs::metadata(&path)?.len();

        let summary = WriteSummary {
            path: path.clone(),
            rows: table.len(),
            columns: table.schema().len(),
            bytes,
        };
        info!(
            path = %summary.path.display(),
            rows = summary.rows,
            columns = summary.columns,
            size_kb = %format!("{:.1}", summary.kilobytes()),
            "wrote table"
        );
        Ok(summary)
    }
}

/// Serialize a table as CSV into any writer
pub fn write_csv<W: io::Write>(table: &Table, writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(table.schema().columns())?;
    for record in table.records() {
        writer.write_record(record.values())?;
    }
    writer.flush()?;
    Ok(())
}
