//! Trait for anything that can hand back a worksheet as raw rows.

use anyhow::Result;

use crate::pipeline::types::RawRow;

/// Abstraction over a spreadsheet provider (Google Sheets, a local CSV export, ...).
#[async_trait::async_trait]
pub trait TabularSource {
    /// Returns every row of worksheet `view` in spreadsheet `source`, header row included.
    async fn get_all_rows(&self, source: &str, view: &str) -> Result<Vec<RawRow>>;
}
