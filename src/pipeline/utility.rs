use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only layouts tried in order. `%m/%d/%y` must precede `%m/%d/%Y`, otherwise `6/4/25`
/// parses as the year 25.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a loosely formatted calendar date, discarding any time-of-day. Returns `None`
/// when nothing matches.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Parses a non-negative integer written with optional `,` thousands separators and
/// surrounding whitespace. Signs, decimals and empty text are rejected.
pub fn parse_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// Formats `n` with `,` between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_common_layouts() {
        let expected = ymd(2025, 6, 4);
        assert_eq!(parse_date("06/04/2025"), Some(expected));
        assert_eq!(parse_date("6/4/2025"), Some(expected));
        assert_eq!(parse_date("6/4/25"), Some(expected));
        assert_eq!(parse_date("2025-06-04"), Some(expected));
        assert_eq!(parse_date(" 2025/06/04 "), Some(expected));
        assert_eq!(parse_date("June 4, 2025"), Some(expected));
        assert_eq!(parse_date("Jun 4, 2025"), Some(expected));
        assert_eq!(parse_date("4-Jun-2025"), Some(expected));
        assert_eq!(parse_date("4 June 2025"), Some(expected));
    }

    #[test]
    fn test_parse_date_drops_time_of_day() {
        let expected = ymd(2025, 6, 4);
        assert_eq!(parse_date("2025-06-04 23:59:00"), Some(expected));
        assert_eq!(parse_date("06/04/2025 08:15"), Some(expected));
        assert_eq!(parse_date("2025-06-04T10:00:00Z"), Some(expected));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("TBD"), None);
        assert_eq!(parse_date("13/45/2025"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1,234"), Some(1234));
        assert_eq!(parse_count("  98765 "), Some(98765));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-5"), None);
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count("n/a"), None);
        assert_eq!(parse_count(","), None);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(100000), "100,000");
    }
}
