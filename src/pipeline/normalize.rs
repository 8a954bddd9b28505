use tracing::debug;

use crate::config::ColumnLayout;
use crate::pipeline::categorize::categorize;
use crate::pipeline::types::{MentionRecord, RawRow};
use crate::pipeline::utility::{parse_count, parse_date};

/// Converts one spreadsheet row into a [`MentionRecord`].
///
/// Never fails: an unparseable date becomes `None`, missing impressions become `0`,
/// and cells beyond the end of a short row read as empty text (which leaves the
/// record unclassified).
pub fn normalize_row(row: &RawRow, layout: &ColumnLayout) -> MentionRecord {
    let date_cell = row.cell(layout.published_at);
    let published_at = parse_date(date_cell);
    if published_at.is_none() {
        debug!(cell = date_cell, "Unparseable publication date");
    }

    let impressions = layout
        .impressions
        .iter()
        .find_map(|&idx| parse_count(row.cell(idx)))
        .unwrap_or_else(|| {
            debug!(cells = row.len(), "No impressions value, defaulting to 0");
            0
        });

    MentionRecord {
        outlet: row.cell(layout.outlet).to_string(),
        headline: row.cell(layout.headline).to_string(),
        published_at,
        impressions,
        url: row.cell(layout.url).to_string(),
        category: categorize(row.cell(layout.class_code_1), row.cell(layout.class_code_2)),
    }
}
