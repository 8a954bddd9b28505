use anyhow::{Context, Result, anyhow};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use super::{DocumentSink, LinkStyle, ParagraphId, TextRun, write_package};
use crate::config::FontSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(TextRun),
    Hyperlink {
        url: String,
        text: String,
        style: LinkStyle,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    /// Visible text of the paragraph, hyperlinks included.
    pub fn text(&self) -> String {
        self.inlines
            .iter()
            .map(|i| match i {
                Inline::Text(run) => run.text.as_str(),
                Inline::Hyperlink { text, .. } => text.as_str(),
            })
            .collect()
    }

    pub fn hyperlinks(&self) -> impl Iterator<Item = (&str, &str, &LinkStyle)> {
        self.inlines.iter().filter_map(|i| match i {
            Inline::Hyperlink { url, text, style } => Some((url.as_str(), text.as_str(), style)),
            Inline::Text(_) => None,
        })
    }
}

/// In-memory document: a default font plus a flat list of paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub font: FontSpec,
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(font: FontSpec) -> Self {
        Self {
            font,
            paragraphs: Vec::new(),
        }
    }

    fn paragraph_mut(&mut self, id: ParagraphId) -> Result<&mut Paragraph> {
        self.paragraphs
            .get_mut(id.0)
            .ok_or_else(|| anyhow!("Unknown paragraph {}", id.0))
    }
}

impl DocumentSink for Document {
    fn add_paragraph(&mut self, runs: Vec<TextRun>) -> ParagraphId {
        self.paragraphs.push(Paragraph {
            inlines: runs.into_iter().map(Inline::Text).collect(),
        });
        ParagraphId(self.paragraphs.len() - 1)
    }

    fn add_run(&mut self, paragraph: ParagraphId, run: TextRun) -> Result<()> {
        self.paragraph_mut(paragraph)?.inlines.push(Inline::Text(run));
        Ok(())
    }

    fn add_hyperlink_run(
        &mut self,
        paragraph: ParagraphId,
        url: &str,
        text: &str,
        style: &LinkStyle,
    ) -> Result<()> {
        self.paragraph_mut(paragraph)?.inlines.push(Inline::Hyperlink {
            url: url.to_string(),
            text: text.to_string(),
            style: style.clone(),
        });
        Ok(())
    }

    /// Packages into a temp file next to `path` and renames it into place only once
    /// fully written and synced.
    fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        let mut tmp = write_package(self, tmp)
            .with_context(|| format!("Failed to write document for {}", path.display()))?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;

        tmp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to save {}", path.display()))?;

        debug!(path = %path.display(), paragraphs = self.paragraphs.len(), "Document saved");
        Ok(())
    }
}
