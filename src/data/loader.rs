//! CSV Data Loader Module
//! Reads the EV market CSV with Polars and memoizes the validated table.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::table::MarketTable;

/// File name the dashboard looks for when no path is given.
pub const DEFAULT_DATA_PATH: &str = "indian_ev_market_2001_2024.csv";

const INFER_SCHEMA_ROWS: usize = 10000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("CSV contains no data rows")]
    Empty,
    #[error("Required column '{column}' not found")]
    MissingColumn { column: String },
    #[error("Column '{column}' contains non-numeric data")]
    NonNumeric { column: String },
    #[error("Column '{column}' has no value at row {row}")]
    MissingValue { column: String, row: usize },
}

/// Read and validate a market CSV.
///
/// Assumption violations found by [`MarketTable::audit`] are logged as
/// warnings; they do not fail the load.
pub fn read_market_csv(path: &Path) -> Result<MarketTable, LoaderError> {
    if !path.is_file() {
        return Err(LoaderError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), "reading CSV");
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .finish()?
        .collect()?;

    let table = MarketTable::try_from_dataframe(df)?;
    for finding in table.audit() {
        warn!(path = %path.display(), %finding, "dataset assumption does not hold");
    }

    info!(
        path = %path.display(),
        rows = table.height(),
        "loaded EV market dataset"
    );
    Ok(table)
}

/// Load-once access to the market table.
///
/// The first call to [`DataLoader::table`] reads the file; later calls hand
/// out the same shared table until [`DataLoader::invalidate`] is called or
/// the path changes.
#[derive(Debug)]
pub struct DataLoader {
    file_path: PathBuf,
    table: Option<Arc<MarketTable>>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            table: None,
        }
    }

    /// Get the table, reading the CSV on first use.
    pub fn table(&mut self) -> Result<Arc<MarketTable>, LoaderError> {
        if let Some(table) = &self.table {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(read_market_csv(&self.file_path)?);
        self.table = Some(Arc::clone(&table));
        Ok(table)
    }

    /// The cached table, if one has been loaded.
    pub fn cached(&self) -> Option<Arc<MarketTable>> {
        self.table.clone()
    }

    /// Store a table loaded elsewhere (used for background loading).
    pub fn set_table(&mut self, table: Arc<MarketTable>) {
        self.table = Some(table);
    }

    /// Drop the cached table so the next access re-reads the file.
    pub fn invalidate(&mut self) {
        self.table = None;
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Point the loader at another file. Clears the cache when the path changes.
    pub fn set_file_path(&mut self, file_path: impl Into<PathBuf>) {
        let file_path = file_path.into();
        if file_path != self.file_path {
            self.file_path = file_path;
            self.invalidate();
        }
    }
}
