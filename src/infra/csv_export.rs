use anyhow::{Context, Result};
use async_trait::async_trait;
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::pipeline::types::RawRow;
use crate::services::TabularSource;

/// Reads a worksheet downloaded from Google Sheets as CSV.
///
/// Sheets names a single-sheet download `<spreadsheet> - <worksheet>.csv`; the source
/// looks for that file under `dir`.
pub struct CsvExportSource {
    dir: PathBuf,
}

impl CsvExportSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, source: &str, view: &str) -> PathBuf {
        self.dir.join(format!("{source} - {view}.csv"))
    }
}

/// Reads every record of a headerless CSV file; rows may differ in length.
///
/// Cells that are not valid UTF-8 (e.g. a Latin-1 export) are decoded lossily instead of
/// failing the whole file.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result.with_context(|| format!("Malformed CSV in {}", path.display()))?;
        rows.push(RawRow::new(
            record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned()),
        ));
    }
    Ok(rows)
}

#[async_trait]
impl TabularSource for CsvExportSource {
    #[tracing::instrument(skip(self))]
    async fn get_all_rows(&self, source: &str, view: &str) -> Result<Vec<RawRow>> {
        let path = self.path_for(source, view);
        let rows = read_rows(&path)?;
        info!(path = %path.display(), rows = rows.len(), "CSV export read");
        Ok(rows)
    }
}
