//! Data types flowing through the report pipeline.

use chrono::NaiveDate;

/// One spreadsheet row as an ordered list of text cells. Positional, no header names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow(pub Vec<String>);

impl RawRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(cells.into_iter().map(Into::into).collect())
    }

    /// Returns the cell at `index`, or an empty string when the row is too short.
    pub fn cell(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Editorial bucket a mention is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Apparel,
    PacksAndBags,
    BrandSustainability,
    /// Not reported. Still produced by normalization so later stages can count it.
    Unclassified,
}

impl Category {
    /// Reported categories in the order their sections appear in the document.
    pub const REPORTED: [Category; 3] = [
        Category::Apparel,
        Category::PacksAndBags,
        Category::BrandSustainability,
    ];

    /// Section heading, or `None` for [`Category::Unclassified`].
    pub fn label(self) -> Option<&'static str> {
        match self {
            Category::Apparel => Some("APPAREL FEATURES"),
            Category::PacksAndBags => Some("PACKS & BAG FEATURES"),
            Category::BrandSustainability => Some("BRAND/SUSTAINABILITY"),
            Category::Unclassified => None,
        }
    }

    pub fn is_reported(self) -> bool {
        self != Category::Unclassified
    }
}

/// A single media citation after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionRecord {
    pub outlet: String,
    pub headline: String,
    pub published_at: Option<NaiveDate>,
    pub impressions: u64,
    pub url: String,
    pub category: Category,
}

/// Inclusive seven-day reporting span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Records of one category, ordered by publication date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub category: Category,
    pub records: Vec<MentionRecord>,
}

impl ReportSection {
    pub fn label(&self) -> &'static str {
        self.category.label().unwrap_or_default()
    }

    /// Saturates at `u64::MAX` rather than overflowing.
    pub fn impressions(&self) -> u64 {
        self.records
            .iter()
            .fold(0, |acc, r| acc.saturating_add(r.impressions))
    }
}

/// Totals shown in the report header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub window: DateWindow,
    pub total_impressions: u64,
    pub total_hits: usize,
}

/// Everything the renderer needs: header totals plus the non-empty sections in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub summary: ReportSummary,
    pub sections: Vec<ReportSection>,
}
