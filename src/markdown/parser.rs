//! Two-level Markdown parser.
//!
//! `# ` opens a slide, `## ` opens a module inside it. The parser is
//! permissive: every input yields a (possibly empty) list of slides.

use std::path::Path;

use crate::encoding::read_text_file;
use crate::error::Result;
use crate::model::{ModuleRecord, SlideRecord};

const SLIDE_PREFIX: &str = "# ";
const MODULE_PREFIX: &str = "## ";

/// Where the scanner currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before the first slide heading
    Preamble,
    /// Between a slide heading and the next heading
    Description,
    /// Inside a module body
    Module,
}

/// Incremental builder for one slide.
struct OpenSlide {
    title: String,
    description: Vec<String>,
    modules: Vec<ModuleRecord>,
    module: Option<(String, Vec<String>)>,
}

impl OpenSlide {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: Vec::new(),
            modules: Vec::new(),
            module: None,
        }
    }

    fn open_module(&mut self, title: &str) {
        self.close_module();
        self.module = Some((title.to_string(), Vec::new()));
    }

    fn close_module(&mut self) {
        if let Some((title, lines)) = self.module.take() {
            self.modules.push(ModuleRecord {
                title,
                content: lines.join("\n"),
            });
        }
    }

    fn finish(mut self) -> SlideRecord {
        self.close_module();
        SlideRecord {
            title: self.title,
            description: self.description.join("\n"),
            modules: self.modules,
        }
    }
}

/// Parse Markdown text into slide records.
///
/// Lines are trimmed before classification. Text before the first `# `
/// heading is discarded, and a `## ` heading with no open slide is skipped.
/// Deeper headings (`###`) are ordinary text.
///
/// # Example
///
/// ```
/// use paperdeck::markdown::parse_markdown;
///
/// let slides = parse_markdown("# Results\nSummary\n## Method\nStep **one**\n");
/// assert_eq!(slides.len(), 1);
/// assert_eq!(slides[0].description, "Summary");
/// assert_eq!(slides[0].modules[0].content, "Step **one**");
/// ```
pub fn parse_markdown(text: &str) -> Vec<SlideRecord> {
    let mut slides = Vec::new();
    let mut current: Option<OpenSlide> = None;
    let mut section = Section::Preamble;

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(title) = line.strip_prefix(SLIDE_PREFIX) {
            if let Some(slide) = current.take() {
                slides.push(slide.finish());
            }
            current = Some(OpenSlide::new(title.trim()));
            section = Section::Description;
            continue;
        }

        if let Some(title) = line.strip_prefix(MODULE_PREFIX) {
            match current.as_mut() {
                Some(slide) => {
                    slide.open_module(title.trim());
                    section = Section::Module;
                }
                None => log::debug!("Skipping module heading before first slide: {}", line),
            }
            continue;
        }

        let Some(slide) = current.as_mut() else {
            continue;
        };
        match section {
            Section::Preamble => {}
            Section::Description => {
                if !line.is_empty() {
                    slide.description.push(line.to_string());
                }
            }
            Section::Module => {
                if let Some((_, lines)) = slide.module.as_mut() {
                    lines.push(line.to_string());
                }
            }
        }
    }

    if let Some(slide) = current {
        slides.push(slide.finish());
    }

    log::debug!("Parsed {} slides", slides.len());
    slides
}

/// Read a Markdown file with encoding detection and parse it.
///
/// # Errors
///
/// Only file-level failures (missing or unreadable file) are reported.
pub fn parse_markdown_file<P: AsRef<Path>>(path: P) -> Result<Vec<SlideRecord>> {
    let decoded = read_text_file(path)?;
    Ok(parse_markdown(&decoded.text))
}
