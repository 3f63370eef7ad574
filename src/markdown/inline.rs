//! Inline `**bold**` handling and paragraph splitting.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Paragraph, TextSpan};

const BOLD_MARKER: &str = "**";

/// Compiled non-greedy bold pattern.
#[derive(Debug, Clone)]
pub struct BoldPattern {
    regex: Regex,
}

impl BoldPattern {
    /// Compile the pattern.
    pub fn new() -> Self {
        Self {
            regex: Regex::new(r"\*\*.*?\*\*").expect("bold pattern is a valid regex"),
        }
    }

    /// Split one line into plain and bold spans.
    ///
    /// Markers are stripped from bold spans. Empty plain pieces are skipped;
    /// an empty bold pair (`****`) still yields an empty bold span.
    pub fn split(&self, line: &str) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        let mut last = 0;

        for m in self.regex.find_iter(line) {
            if m.start() > last {
                spans.push(TextSpan::plain(&line[last..m.start()]));
            }
            let inner = &m.as_str()[BOLD_MARKER.len()..m.as_str().len() - BOLD_MARKER.len()];
            spans.push(TextSpan::bold(inner));
            last = m.end();
        }

        if last < line.len() {
            spans.push(TextSpan::plain(&line[last..]));
        }

        spans
    }

    /// Remove matched marker pairs, leaving the text between them.
    pub fn strip(&self, line: &str) -> String {
        self.split(line).into_iter().map(|s| s.text).collect()
    }
}

impl Default for BoldPattern {
    fn default() -> Self {
        Self::new()
    }
}

fn bold_pattern() -> &'static BoldPattern {
    static PATTERN: OnceLock<BoldPattern> = OnceLock::new();
    PATTERN.get_or_init(BoldPattern::new)
}

/// Split one line into plain and bold spans using the shared pattern.
pub fn split_bold(line: &str) -> Vec<TextSpan> {
    bold_pattern().split(line)
}

/// Turn module content into paragraphs, one per line.
///
/// The box starts with one empty paragraph. A non-blank first line fills it;
/// every later non-blank line opens a new one. A blank line opens an empty
/// spacer paragraph unless it is the last line.
pub fn to_paragraphs(content: &str) -> Vec<Paragraph> {
    let pattern = bold_pattern();
    let lines: Vec<&str> = content.split('\n').collect();
    let last = lines.len().saturating_sub(1);
    let mut paragraphs = vec![Paragraph::new()];

    for (idx, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            if idx < last {
                paragraphs.push(Paragraph::new());
            }
            continue;
        }

        let spans = pattern.split(line);
        if idx == 0 {
            paragraphs[0].spans = spans;
        } else {
            paragraphs.push(Paragraph::from_spans(spans));
        }
    }

    paragraphs
}

/// Turn plain text into paragraphs, one per line, without bold parsing.
pub fn plain_paragraphs(text: &str) -> Vec<Paragraph> {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                Paragraph::new()
            } else {
                Paragraph::with_text(line)
            }
        })
        .collect()
}
