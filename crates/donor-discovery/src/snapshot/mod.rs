//! Donor snapshot files: loading, bulk-import validation, and CSV/JSON export.

mod export;
mod import;

pub use export::{export_csv, export_json, EXPORT_HEADERS};
pub use import::{import_reader, ImportOutcome, ImportReport, ImportRowError};

use crate::discovery::DonorRecord;
use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read donor snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid donor CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid donor JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot format '{0}' (expected .csv or .json)")]
    UnsupportedFormat(String),
    #[error("no donors to export")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Csv,
    Json,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(SnapshotError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Loads donors from a snapshot file.
///
/// JSON snapshots hold donor objects in the upstream API shape. CSV files go
/// through bulk-import validation and only the accepted rows are returned.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<DonorRecord>, SnapshotError> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;
    let file = std::fs::File::open(path)?;
    let modified = file
        .metadata()
        .and_then(|meta| meta.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());
    read_snapshot(file, format, modified)
}

/// `imported_at` stamps CSV rows that carry no registration date.
pub fn read_snapshot<R: Read>(
    reader: R,
    format: SnapshotFormat,
    imported_at: DateTime<Utc>,
) -> Result<Vec<DonorRecord>, SnapshotError> {
    match format {
        SnapshotFormat::Json => Ok(serde_json::from_reader(reader)?),
        SnapshotFormat::Csv => Ok(import_reader(reader, format, imported_at)?.records),
    }
}
