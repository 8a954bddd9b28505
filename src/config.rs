//! Run configuration.
//!
//! Every constant of a report run lives in [`ReportConfig`]. Defaults reproduce the weekly
//! Cotopaxi online-hits report; the only value read from the environment is the service
//! account credentials path used by the Google transport.

use std::path::PathBuf;

use chrono::Weekday;

pub const DEFAULT_SOURCE: &str = "Cotopaxi Media Report - 2025";
pub const DEFAULT_VIEW: &str = "ONLINE";
pub const DEFAULT_OUTPUT: &str = "cotopaxi_weekly_hits.docx";
pub const DEFAULT_CREDENTIALS: &str = "credentials.json";
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Zero-based column index for each role a cell plays in a mention row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub outlet: usize,
    pub headline: usize,
    pub published_at: usize,
    /// Candidate impression columns in priority order; the first that holds a plain
    /// integer wins.
    pub impressions: Vec<usize>,
    pub url: usize,
    pub class_code_1: usize,
    pub class_code_2: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            outlet: 0,
            headline: 3,
            published_at: 4,
            impressions: vec![5, 6],
            url: 7,
            class_code_1: 8,
            class_code_2: 9,
        }
    }
}

/// How the text before each record's hyperlink is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutletDisplay {
    /// `06/04/2025 – outsideonline.com: `
    #[default]
    DatedOutlet,
    /// `Outsideonline: ` derived from the outlet's domain.
    DerivedName,
}

/// Default document font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub name: String,
    pub size_pt: u32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            size_pt: 11,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Spreadsheet name.
    pub source: String,
    /// Worksheet name inside `source`.
    pub view: String,
    pub output: PathBuf,
    pub credentials_path: PathBuf,
    pub columns: ColumnLayout,
    /// Weekday the reporting window closes on.
    pub week_end: Weekday,
    pub outlet_display: OutletDisplay,
    pub font: FontSpec,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            view: DEFAULT_VIEW.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS),
            columns: ColumnLayout::default(),
            week_end: Weekday::Wed,
            outlet_display: OutletDisplay::default(),
            font: FontSpec::default(),
        }
    }
}

impl ReportConfig {
    /// Builds the config from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Builds the config using `lookup` for environment values, so tests never touch
    /// the real process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let credentials_path = lookup(CREDENTIALS_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS));

        Self {
            credentials_path,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env::VarError;

    fn lookup_from(map: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Result<String, VarError> {
        move |key| map.get(key).map(|v| v.to_string()).ok_or(VarError::NotPresent)
    }

    #[test]
    fn test_defaults_match_weekly_report() {
        let config = ReportConfig::from_lookup(lookup_from(HashMap::new()));
        assert_eq!(config.source, "Cotopaxi Media Report - 2025");
        assert_eq!(config.view, "ONLINE");
        assert_eq!(config.output, PathBuf::from("cotopaxi_weekly_hits.docx"));
        assert_eq!(config.credentials_path, PathBuf::from("credentials.json"));
        assert_eq!(config.week_end, Weekday::Wed);
        assert_eq!(config.outlet_display, OutletDisplay::DatedOutlet);
        assert_eq!(config.columns.impressions, vec![5, 6]);
    }

    #[test]
    fn test_credentials_path_from_env() {
        let config = ReportConfig::from_lookup(lookup_from(HashMap::from([(
            CREDENTIALS_ENV,
            "/secrets/sa.json",
        )])));
        assert_eq!(config.credentials_path, PathBuf::from("/secrets/sa.json"));
    }

    #[test]
    fn test_blank_credentials_env_falls_back() {
        let config =
            ReportConfig::from_lookup(lookup_from(HashMap::from([(CREDENTIALS_ENV, "  ")])));
        assert_eq!(config.credentials_path, PathBuf::from(DEFAULT_CREDENTIALS));
    }
}
