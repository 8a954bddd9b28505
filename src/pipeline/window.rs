use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::pipeline::types::{DateWindow, MentionRecord};

impl DateWindow {
    /// The seven-day window closing on the first `week_end` on or after `today`.
    ///
    /// With `week_end = Wed` this is the Thursday-to-Wednesday reporting week; when
    /// `today` is itself a Wednesday the window ends today.
    pub fn ending_on_or_after(today: NaiveDate, week_end: Weekday) -> Self {
        let target = i64::from(week_end.num_days_from_monday());
        let current = i64::from(today.weekday().num_days_from_monday());
        let offset = (target - current).rem_euclid(7);

        let end = today + Duration::days(offset);
        let start = end - Duration::days(6);
        Self { start, end }
    }

    /// Inclusive on both ends. Undated records never match.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        date.is_some_and(|d| self.start <= d && d <= self.end)
    }

    /// Keeps only the records published inside the window, preserving source order.
    pub fn select(&self, records: Vec<MentionRecord>) -> Vec<MentionRecord> {
        records
            .into_iter()
            .filter(|r| self.contains(r.published_at))
            .collect()
    }
}
