//! Report rendering.
//!
//! Turns an aggregated [`Report`] into document paragraphs through a [`DocumentSink`].
//! No I/O happens here; saving is the caller's job.

use anyhow::Result;

use crate::config::{FontSpec, OutletDisplay};
use crate::docx::{Document, DocumentSink, LinkStyle, TextRun};
use crate::pipeline::types::{MentionRecord, Report};
use crate::pipeline::utility::group_thousands;

/// Rendering knobs that do not affect the report's content.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub outlet_display: OutletDisplay,
    pub link_style: LinkStyle,
    pub font: FontSpec,
}

/// Renders `report` into a fresh in-memory [`Document`].
pub fn render(report: &Report, options: &RenderOptions) -> Result<Document> {
    let mut doc = Document::new(options.font.clone());
    render_into(&mut doc, report, options)?;
    Ok(doc)
}

/// Writes the header block and one section per non-empty category into `sink`.
pub fn render_into<S: DocumentSink>(
    sink: &mut S,
    report: &Report,
    options: &RenderOptions,
) -> Result<()> {
    let summary = &report.summary;

    sink.add_paragraph(vec![TextRun::bold(format!(
        "Date Range: {} - {}",
        summary.window.start.format("%B %d, %Y"),
        summary.window.end.format("%B %d, %Y")
    ))]);
    sink.add_paragraph(vec![TextRun::plain(format!(
        "Total Impressions: {}",
        group_thousands(summary.total_impressions)
    ))]);
    sink.add_paragraph(vec![TextRun::plain(format!(
        "Total Hits: {}",
        summary.total_hits
    ))]);
    sink.add_paragraph(vec![TextRun::plain("")]);

    for section in report.sections.iter().filter(|s| !s.records.is_empty()) {
        sink.add_paragraph(vec![TextRun::bold(section.label())]);

        for record in &section.records {
            let p = sink.add_paragraph(vec![TextRun::plain(record_prefix(
                record,
                options.outlet_display,
            ))]);
            sink.add_hyperlink_run(p, &record.url, &record.headline, &options.link_style)?;
            sink.add_run(
                p,
                TextRun::plain(format!(
                    " - {} Impressions",
                    group_thousands(record.impressions)
                )),
            )?;
        }
    }

    Ok(())
}

/// Text placed before the record's hyperlink.
pub fn record_prefix(record: &MentionRecord, display: OutletDisplay) -> String {
    match display {
        OutletDisplay::DatedOutlet => {
            let date = record
                .published_at
                .map(|d| d.format("%m/%d/%Y").to_string())
                .unwrap_or_default();
            format!("{date} – {}: ", record.outlet)
        }
        OutletDisplay::DerivedName => format!("{}: ", derive_outlet_name(&record.outlet)),
    }
}

/// Derives a readable outlet name from domain-like text.
///
/// `https://www.outside-online.com/gear` becomes `Outside Online`, `news.bbc.co.uk`
/// becomes `Bbc`. Text that does not look like a host name is returned trimmed.
pub fn derive_outlet_name(outlet: &str) -> String {
    let trimmed = outlet.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("")
        .split(':')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let looks_like_host = host.contains('.')
        && !host.contains(char::is_whitespace)
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if !looks_like_host {
        return trimmed.to_string();
    }

    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    let name = match labels.as_slice() {
        [] => return trimmed.to_string(),
        [only] => *only,
        // Second-level country suffixes like `co.uk` push the name one label left.
        [.., name, sld, _tld] if labels.len() >= 3 && is_second_level_suffix(sld) => *name,
        [.., name, _tld] => *name,
    };

    name.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_second_level_suffix(label: &str) -> bool {
    matches!(label, "co" | "com" | "org" | "net" | "gov" | "ac" | "edu")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::Inline;
    use crate::pipeline::types::{Category, DateWindow, ReportSection, ReportSummary};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(outlet: &str, headline: &str, day: u32, impressions: u64) -> MentionRecord {
        MentionRecord {
            outlet: outlet.into(),
            headline: headline.into(),
            published_at: Some(ymd(2025, 6, day)),
            impressions,
            url: format!("https://{outlet}/story"),
            category: Category::Apparel,
        }
    }

    fn report() -> Report {
        let apparel = vec![
            record("rei.com", "Jackets", 1, 1_500),
            record("gearjunkie.com", "Fleece", 2, 250),
        ];
        let brand = vec![MentionRecord {
            category: Category::BrandSustainability,
            ..record("outsideonline.com", "B Corp", 3, 1_000_000)
        }];
        Report {
            summary: ReportSummary {
                window: DateWindow {
                    start: ymd(2025, 5, 29),
                    end: ymd(2025, 6, 4),
                },
                total_impressions: 1_001_750,
                total_hits: 3,
            },
            sections: vec![
                ReportSection {
                    category: Category::Apparel,
                    records: apparel,
                },
                ReportSection {
                    category: Category::BrandSustainability,
                    records: brand,
                },
            ],
        }
    }

    #[test]
    fn test_header_block() {
        let doc = render(&report(), &RenderOptions::default()).unwrap();
        let texts: Vec<String> = doc.paragraphs.iter().map(|p| p.text()).collect();

        assert_eq!(texts[0], "Date Range: May 29, 2025 - June 04, 2025");
        assert_eq!(texts[1], "Total Impressions: 1,001,750");
        assert_eq!(texts[2], "Total Hits: 3");
        assert_eq!(texts[3], "");
        assert_eq!(
            doc.paragraphs[0].inlines,
            vec![Inline::Text(TextRun::bold(texts[0].clone()))]
        );
    }

    #[test]
    fn test_sections_and_record_lines() {
        let doc = render(&report(), &RenderOptions::default()).unwrap();
        let texts: Vec<String> = doc.paragraphs.iter().map(|p| p.text()).collect();

        assert_eq!(texts[4], "APPAREL FEATURES");
        assert_eq!(texts[5], "06/01/2025 – rei.com: Jackets - 1,500 Impressions");
        assert_eq!(texts[6], "06/02/2025 – gearjunkie.com: Fleece - 250 Impressions");
        assert_eq!(texts[7], "BRAND/SUSTAINABILITY");
        assert_eq!(
            texts[8],
            "06/03/2025 – outsideonline.com: B Corp - 1,000,000 Impressions"
        );
        assert_eq!(texts.len(), 9);
    }

    #[test]
    fn test_hyperlink_only_on_headline() {
        let doc = render(&report(), &RenderOptions::default()).unwrap();
        let line = &doc.paragraphs[5];

        assert_eq!(line.inlines.len(), 3);
        assert!(matches!(&line.inlines[0], Inline::Text(r) if !r.bold));
        assert!(matches!(&line.inlines[2], Inline::Text(r) if !r.bold));

        let links: Vec<_> = line.hyperlinks().collect();
        assert_eq!(links.len(), 1);
        let (url, text, style) = links[0];
        assert_eq!(url, "https://rei.com/story");
        assert_eq!(text, "Jackets");
        assert_eq!(style, &LinkStyle::default());
    }

    #[test]
    fn test_totals_reconstructed_from_rendered_sections() {
        let report = report();
        let doc = render(&report, &RenderOptions::default()).unwrap();

        let link_lines: Vec<_> = doc
            .paragraphs
            .iter()
            .filter(|p| p.hyperlinks().count() == 1)
            .collect();
        let impressions: u64 = link_lines
            .iter()
            .map(|p| {
                let text = p.text();
                let count = text
                    .rsplit(" - ")
                    .next()
                    .and_then(|s| s.strip_suffix(" Impressions"))
                    .unwrap()
                    .replace(',', "");
                count.parse::<u64>().unwrap()
            })
            .sum();

        assert_eq!(link_lines.len(), report.summary.total_hits);
        assert_eq!(impressions, report.summary.total_impressions);
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let mut report = report();
        report.sections.push(ReportSection {
            category: Category::PacksAndBags,
            records: vec![],
        });
        let doc = render(&report, &RenderOptions::default()).unwrap();
        assert!(!doc.paragraphs.iter().any(|p| p.text() == "PACKS & BAG FEATURES"));
    }

    #[test]
    fn test_derived_name_prefix() {
        let options = RenderOptions {
            outlet_display: OutletDisplay::DerivedName,
            ..RenderOptions::default()
        };
        let doc = render(&report(), &options).unwrap();
        assert_eq!(doc.paragraphs[5].text(), "Rei: Jackets - 1,500 Impressions");
        assert_eq!(
            doc.paragraphs[6].text(),
            "Gearjunkie: Fleece - 250 Impressions"
        );
    }

    #[test]
    fn test_derive_outlet_name() {
        assert_eq!(derive_outlet_name("outsideonline.com"), "Outsideonline");
        assert_eq!(
            derive_outlet_name("https://www.outside-online.com/gear?id=1"),
            "Outside Online"
        );
        assert_eq!(derive_outlet_name("news.bbc.co.uk"), "Bbc");
        assert_eq!(derive_outlet_name("WWW.GearJunkie.com:443"), "Gearjunkie");
        assert_eq!(derive_outlet_name("Outside Magazine"), "Outside Magazine");
        assert_eq!(derive_outlet_name("  "), "");
    }

    #[test]
    fn test_undated_record_prefix() {
        let rec = MentionRecord {
            published_at: None,
            ..record("rei.com", "x", 1, 0)
        };
        assert_eq!(
            record_prefix(&rec, OutletDisplay::DatedOutlet),
            " – rei.com: "
        );
    }
}
