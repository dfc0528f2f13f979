//! CSV and JSON export of dancer summaries.
//!
//! Writers accept any `Write`; the `export_*` helpers create the target
//! file (and its parent directories) first.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::DancerSummary;

/// Column order of the exported table; matches `DancerSummary` field order.
pub const COLUMNS: [&str; 35] = [
    "id", "division", "role", "region",
    "new_points", "nov_points", "int_points", "adv_points", "als_points",
    "end_date",
    "new_start", "new_end", "nov_start", "nov_end", "int_start", "int_end",
    "adv_start", "adv_end", "als_start", "als_end",
    "new_count", "nov_count", "int_count", "adv_count", "als_count",
    "nov_place", "int_place", "adv_place", "als_place",
    "nov_first", "int_first", "adv_first", "als_first",
    "adv_3y", "als_3y",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("CSV error writing {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("JSON error writing {path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
}

/// Write summaries as CSV with a header row. Returns the row count.
pub fn write_csv<W: Write>(
    summaries: &[DancerSummary],
    writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    let csv_error = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // Header is written by hand so an empty scan still yields a valid table
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(COLUMNS).map_err(csv_error)?;

    for summary in summaries {
        csv_writer.serialize(summary).map_err(csv_error)?;
    }

    csv_writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(summaries.len())
}

/// Write summaries as a pretty-printed JSON array.
pub fn write_json<W: Write>(
    summaries: &[DancerSummary],
    writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, summaries).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(summaries.len())
}

fn create_file(path: &Path) -> Result<BufWriter<File>, ExportError> {
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    File::create(path).map(BufWriter::new).map_err(io_error)
}

pub fn export_csv(summaries: &[DancerSummary], path: &Path) -> Result<usize, ExportError> {
    let file = create_file(path)?;
    write_csv(summaries, file, path)
}

pub fn export_json(summaries: &[DancerSummary], path: &Path) -> Result<usize, ExportError> {
    let mut file = create_file(path)?;
    let count = write_json(summaries, &mut file, path)?;
    file.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(count)
}
