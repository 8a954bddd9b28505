//! Weekly media-mention pipeline.
//!
//! Raw spreadsheet rows are normalized into [`types::MentionRecord`]s, filtered to the
//! current reporting week, then grouped by category with header totals. Every stage is
//! a pure function of its input and the injected `today`.

pub mod aggregate;
pub mod categorize;
pub mod normalize;
pub mod types;
pub mod utility;
pub mod window;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::ReportConfig;
use aggregate::aggregate;
use normalize::normalize_row;
use types::{DateWindow, MentionRecord, RawRow, Report};

/// Runs the whole pipeline over a sheet's rows. The first row is the header and is skipped.
#[tracing::instrument(skip(rows, config), fields(rows = rows.len(), today = %today))]
pub fn build_report(rows: &[RawRow], today: NaiveDate, config: &ReportConfig) -> Report {
    let records: Vec<MentionRecord> = rows
        .iter()
        .skip(1)
        .map(|row| normalize_row(row, &config.columns))
        .collect();
    let undated = records.iter().filter(|r| r.published_at.is_none()).count();
    debug!(records = records.len(), undated, "Rows normalized");

    let window = DateWindow::ending_on_or_after(today, config.week_end);
    let in_window = window.select(records);
    info!(
        start = %window.start,
        end = %window.end,
        in_window = in_window.len(),
        "Reporting window selected"
    );

    let report = aggregate(window, in_window);
    for section in &report.sections {
        info!(
            section = section.label(),
            hits = section.records.len(),
            impressions = section.impressions(),
            "Section"
        );
    }
    info!(
        total_hits = report.summary.total_hits,
        total_impressions = report.summary.total_impressions,
        "Report aggregated"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::Category;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sheet() -> Vec<RawRow> {
        vec![
            RawRow::new([
                "Outlet", "Author", "Type", "Headline", "Date", "UVM", "Impr", "Link", "C1", "C2",
            ]),
            RawRow::new([
                "gearjunkie.com", "", "", "Start of week", "05/29/2025", "1,234", "", "https://gj/1",
                "P", "P",
            ]),
            RawRow::new([
                "rei.com", "", "", "Too early", "05/28/2025", "9", "", "https://rei/1", "P", "P",
            ]),
            RawRow::new([
                "outsideonline.com", "", "", "Brand story", "06/04/2025", "", "2,000", "https://o/1",
                "B", "A",
            ]),
            RawRow::new(["short.com", "", "", "Short row", "06/01/2025", "10", ""]),
            RawRow::new([
                "nodate.com", "", "", "No date", "", "10", "", "https://n/1", "P", "A",
            ]),
        ]
    }

    #[test]
    fn test_header_row_is_skipped() {
        let rows = vec![RawRow::new([
            "Outlet", "", "", "Headline", "06/02/2025", "5", "", "Link", "P", "A",
        ])];
        let report = build_report(&rows, ymd(2025, 6, 2), &ReportConfig::default());
        assert_eq!(report.summary.total_hits, 0);
    }

    #[test]
    fn test_monday_scenario() {
        let report = build_report(&sheet(), ymd(2025, 6, 2), &ReportConfig::default());

        assert_eq!(report.summary.window.start, ymd(2025, 5, 29));
        assert_eq!(report.summary.window.end, ymd(2025, 6, 4));
        assert_eq!(report.summary.total_hits, 2);
        assert_eq!(report.summary.total_impressions, 3_234);

        assert_eq!(report.sections.len(), 2);
        let packs = &report.sections[0];
        assert_eq!(packs.category, Category::PacksAndBags);
        assert_eq!(packs.records[0].headline, "Start of week");
        assert_eq!(packs.records[0].impressions, 1_234);

        let brand = &report.sections[1];
        assert_eq!(brand.category, Category::BrandSustainability);
        assert_eq!(brand.records[0].impressions, 2_000);
    }

    #[test]
    fn test_idempotent() {
        let config = ReportConfig::default();
        let first = build_report(&sheet(), ymd(2025, 6, 2), &config);
        let second = build_report(&sheet(), ymd(2025, 6, 2), &config);
        assert_eq!(first, second);
    }
}
