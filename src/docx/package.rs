//! Office Open XML packaging for [`Document`].

use anyhow::Result;
use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::io::{Seek, Write};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::document::{Document, Inline};
use super::{LinkStyle, TextRun, Underline};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES: &str = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

/// Writes `doc` as a `.docx` zip archive into `writer` and hands the writer back.
pub fn write_package<W: Write + Seek>(doc: &Document, writer: W) -> Result<W> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(writer);

    let (body, links) = document_xml(doc);

    let parts = [
        ("[Content_Types].xml", format!("{XML_DECL}{CONTENT_TYPES}")),
        ("_rels/.rels", package_rels_xml()),
        ("word/document.xml", body),
        ("word/styles.xml", styles_xml(doc)),
        ("word/_rels/document.xml.rels", document_rels_xml(&links)),
    ];

    for (name, content) in parts {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }

    Ok(zip.finish()?)
}

fn package_rels_xml() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_PKG_RELS}"><Relationship Id="rId1" Type="{REL_DOCUMENT}" Target="word/document.xml"/></Relationships>"#
    )
}

/// `rId1` is reserved for the styles part; hyperlink ids start at `rId2`.
fn hyperlink_rel_id(index: usize) -> String {
    format!("rId{}", index + 2)
}

fn document_rels_xml(links: &[String]) -> String {
    let mut out = format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_PKG_RELS}"><Relationship Id="rId1" Type="{REL_STYLES}" Target="styles.xml"/>"#
    );
    for (i, url) in links.iter().enumerate() {
        let _ = write!(
            out,
            r#"<Relationship Id="{}" Type="{REL_HYPERLINK}" Target="{}" TargetMode="External"/>"#,
            hyperlink_rel_id(i),
            xml_escape(url)
        );
    }
    out.push_str("</Relationships>");
    out
}

fn styles_xml(doc: &Document) -> String {
    let font = xml_escape(&doc.font.name);
    // w:sz is in half-points
    let size = doc.font.size_pt * 2;
    let rpr = format!(
        r#"<w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr>"#
    );
    format!(
        r#"{XML_DECL}<w:styles xmlns:w="{NS_W}"><w:docDefaults><w:rPrDefault>{rpr}</w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/>{rpr}</w:style></w:styles>"#
    )
}

/// Returns the document part and the hyperlink targets in relationship order.
fn document_xml(doc: &Document) -> (String, Vec<String>) {
    let mut links = Vec::new();
    let mut out = format!(r#"{XML_DECL}<w:document xmlns:w="{NS_W}" xmlns:r="{NS_R}"><w:body>"#);

    for paragraph in &doc.paragraphs {
        out.push_str("<w:p>");
        for inline in &paragraph.inlines {
            match inline {
                Inline::Text(run) => push_text_run(&mut out, run),
                Inline::Hyperlink { url, text, style } => {
                    let id = hyperlink_rel_id(links.len());
                    links.push(url.clone());
                    let _ = write!(out, r#"<w:hyperlink r:id="{id}">"#);
                    push_run(&mut out, text, &link_properties(style));
                    out.push_str("</w:hyperlink>");
                }
            }
        }
        out.push_str("</w:p>");
    }

    out.push_str(r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#);
    out.push_str("</w:body></w:document>");
    (out, links)
}

fn link_properties(style: &LinkStyle) -> String {
    let mut props = format!(r#"<w:color w:val="{}"/>"#, xml_escape(&style.color));
    if style.underline == Underline::Single {
        props.push_str(r#"<w:u w:val="single"/>"#);
    }
    props
}

fn push_text_run(out: &mut String, run: &TextRun) {
    let props = if run.bold { "<w:b/>" } else { "" };
    push_run(out, &run.text, props);
}

fn push_run(out: &mut String, text: &str, props: &str) {
    out.push_str("<w:r>");
    if !props.is_empty() {
        let _ = write!(out, "<w:rPr>{props}</w:rPr>");
    }
    let _ = write!(
        out,
        r#"<w:t xml:space="preserve">{}</w:t></w:r>"#,
        xml_escape(text)
    );
}

/// Escapes `raw` for XML 1.0, dropping the control characters XML cannot represent.
fn xml_escape(raw: &str) -> String {
    let legal: String = raw.chars().filter(|&c| is_xml_char(c)).collect();
    escape(legal.as_str()).into_owned()
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}
