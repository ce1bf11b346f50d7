use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PricePoint, SyncError, format_snapped_at, parse_snapped_at};

/// Collaborator trait for series storage.
///
/// A store holds the full persisted row set for one series; every successful
/// sync rewrites the whole set rather than appending.
pub trait SeriesStore: Send + Sync {
    /// Whether any stored data exists for this series.
    fn exists(&self) -> bool;

    /// Load all stored points, in storage order. Absent storage yields an
    /// empty sequence.
    ///
    /// # Errors
    /// Returns `SyncError::StorageCorrupt` for unparseable rows and
    /// `SyncError::Io` for filesystem failures.
    fn load(&self) -> Result<Vec<PricePoint>, SyncError>;

    /// Replace the stored row set with `points`, in the given order.
    ///
    /// # Errors
    /// Returns `SyncError::Io` when the rewrite fails.
    fn write_all(&self, points: &[PricePoint]) -> Result<(), SyncError>;

    /// Human-readable storage location for logging and reports.
    fn describe(&self) -> String;
}

/// On-row serde shape of the stored CSV: `snapped_at,price`.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    snapped_at: String,
    price: Decimal,
}

/// On-disk series store over a UTF-8 CSV file with a required header row.
///
/// Writes go through a temp file in the destination directory followed by an
/// atomic rename, so an interrupted run never leaves a truncated series.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Create a store over the given file path. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination path of the series file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn map_csv_err(&self, err: csv::Error) -> SyncError {
        let msg = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => SyncError::Io(io),
            _ => SyncError::storage_corrupt(format!("{}: {msg}", self.path.display())),
        }
    }
}

impl SeriesStore for CsvStore {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> Result<Vec<PricePoint>, SyncError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| self.map_csv_err(e))?;
        let mut points = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row.map_err(|e| self.map_csv_err(e))?;
            let snapped_at = parse_snapped_at(&row.snapped_at).map_err(|e| match e {
                SyncError::StorageCorrupt { what } => {
                    SyncError::storage_corrupt(format!("{}: {what}", self.path.display()))
                }
                other => other,
            })?;
            points.push(PricePoint::new(snapped_at, row.price));
        }
        Ok(points)
    }

    fn write_all(&self, points: &[PricePoint]) -> Result<(), SyncError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let tmp = tempfile::NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file());
            if points.is_empty() {
                // Serde-driven headers are only emitted alongside rows.
                writer
                    .write_record(["snapped_at", "price"])
                    .map_err(|e| self.map_csv_err(e))?;
            }
            for p in points {
                writer
                    .serialize(CsvRow {
                        snapped_at: format_snapped_at(p.snapped_at),
                        price: p.price,
                    })
                    .map_err(|e| self.map_csv_err(e))?;
            }
            writer.flush().map_err(SyncError::Io)?;
        }
        tmp.persist(&self.path).map_err(|e| SyncError::Io(e.error))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
