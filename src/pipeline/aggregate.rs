use crate::pipeline::types::{
    Category, DateWindow, MentionRecord, Report, ReportSection, ReportSummary,
};

/// Groups windowed records into report sections and computes the header totals.
///
/// Unclassified records are dropped first, so the totals always equal the sum and count
/// over the emitted sections. Sections follow [`Category::REPORTED`] order, empty ones
/// are omitted, and records within a section are sorted by date with source order kept
/// for ties.
pub fn aggregate(window: DateWindow, records: Vec<MentionRecord>) -> Report {
    let hits: Vec<MentionRecord> = records
        .into_iter()
        .filter(|r| r.category.is_reported())
        .collect();

    let summary = ReportSummary {
        window,
        total_impressions: hits
            .iter()
            .fold(0, |acc, r| acc.saturating_add(r.impressions)),
        total_hits: hits.len(),
    };

    let sections = Category::REPORTED
        .iter()
        .filter_map(|&category| {
            let mut records: Vec<MentionRecord> = hits
                .iter()
                .filter(|r| r.category == category)
                .cloned()
                .collect();
            if records.is_empty() {
                return None;
            }
            // sort_by_key is stable, so same-day records keep their sheet order.
            records.sort_by_key(|r| r.published_at);
            Some(ReportSection { category, records })
        })
        .collect();

    Report { summary, sections }
}
