use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use super::auth::service_account_token;
use crate::fetch::auth::Bearer;
use crate::fetch::{BasicClient, HttpClient, fetch_json};
use crate::pipeline::types::RawRow;
use crate::services::TabularSource;

const DRIVE_BASE: &str = "https://www.googleapis.com/";
const SHEETS_BASE: &str = "https://sheets.googleapis.com/";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Reads worksheets from Google Sheets, locating the spreadsheet by its title.
pub struct GoogleSheetsSource<C> {
    client: C,
    drive_base: Url,
    sheets_base: Url,
}

impl GoogleSheetsSource<Bearer<BasicClient>> {
    /// Authenticates the service account and returns a source ready to read.
    pub async fn connect(credentials_path: &Path) -> Result<Self> {
        let token = service_account_token(credentials_path).await?;
        Self::new(Bearer::new(BasicClient::new()?, token))
    }
}

impl<C: HttpClient> GoogleSheetsSource<C> {
    pub fn new(client: C) -> Result<Self> {
        Self::with_endpoints(client, DRIVE_BASE, SHEETS_BASE)
    }

    /// Points the Drive and Sheets calls at other hosts (a local mock server in tests).
    pub fn with_endpoints(client: C, drive_base: &str, sheets_base: &str) -> Result<Self> {
        Ok(Self {
            client,
            drive_base: Url::parse(drive_base)?,
            sheets_base: Url::parse(sheets_base)?,
        })
    }

    fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Cannot build API path on {}", base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Finds the id of the spreadsheet titled `name` among files the account can see.
    async fn resolve_spreadsheet_id(&self, name: &str) -> Result<String> {
        let mut url = Self::endpoint(&self.drive_base, &["drive", "v3", "files"])?;
        let query = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            name.replace('\\', "\\\\").replace('\'', "\\'"),
            SPREADSHEET_MIME
        );
        url.query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("fields", "files(id,name)")
            .append_pair("pageSize", "10")
            .append_pair("supportsAllDrives", "true")
            .append_pair("includeItemsFromAllDrives", "true");

        let list: FileList = fetch_json(&self.client, url)
            .await
            .context("Drive file lookup failed")?;

        let mut files = list.files.into_iter();
        let Some(first) = files.next() else {
            bail!("Spreadsheet '{name}' not found or not shared with the service account");
        };
        let others = files.count();
        if others > 0 {
            warn!(name = %first.name, others, "Several spreadsheets share this name, using the first");
        }
        Ok(first.id)
    }

    async fn read_values(&self, spreadsheet_id: &str, view: &str) -> Result<Vec<RawRow>> {
        let mut url = Self::endpoint(
            &self.sheets_base,
            &["v4", "spreadsheets", spreadsheet_id, "values", view],
        )?;
        url.query_pairs_mut()
            .append_pair("majorDimension", "ROWS")
            .append_pair("valueRenderOption", "FORMATTED_VALUE");

        let range: ValueRange = fetch_json(&self.client, url)
            .await
            .with_context(|| format!("Reading worksheet '{view}' failed"))?;

        Ok(range
            .values
            .into_iter()
            .map(|cells| RawRow(cells.into_iter().map(cell_text).collect()))
            .collect())
    }
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl<C: HttpClient> TabularSource for GoogleSheetsSource<C> {
    #[tracing::instrument(skip(self))]
    async fn get_all_rows(&self, source: &str, view: &str) -> Result<Vec<RawRow>> {
        let id = self.resolve_spreadsheet_id(source).await?;
        let rows = self.read_values(&id, view).await?;
        info!(rows = rows.len(), "Worksheet fetched");
        Ok(rows)
    }
}
