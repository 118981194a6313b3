use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("table I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("table codec error: {0}")]
    Codec(#[from] csv::Error),
}

/// Narrow persistence interface for a durable table: read the whole table,
/// or replace it wholesale. Mutating operations are expressed by callers as
/// load, modify, replace.
pub trait TableBackend<T>: Send + Sync {
    fn load(&self) -> Result<Vec<T>, StorageError>;
    fn replace(&self, rows: &[T]) -> Result<(), StorageError>;
}

/// CSV file with a header row. An absent file reads as an empty table.
pub struct CsvTable<T> {
    path: PathBuf,
    columns: &'static [&'static str],
    _row: PhantomData<fn() -> T>,
}

impl<T> CsvTable<T> {
    pub fn new(path: impl Into<PathBuf>, columns: &'static [&'static str]) -> Self {
        Self {
            path: path.into(),
            columns,
            _row: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> TableBackend<T> for CsvTable<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn load(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            debug!("table file {} absent, treating as empty", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<T>, csv::Error>>()?;
        Ok(rows)
    }

    fn replace(&self, rows: &[T]) -> Result<(), StorageError> {
        let mut writer = csv::Writer::from_path(&self.path)?;

        if rows.is_empty() {
            // serde-driven headers are only emitted alongside a record, so an
            // emptied table keeps its column contract via an explicit header.
            writer.write_record(self.columns)?;
        } else {
            for row in rows {
                writer.serialize(row)?;
            }
        }

        writer.flush()?;
        debug!("rewrote table file {} ({} rows)", self.path.display(), rows.len());
        Ok(())
    }
}
