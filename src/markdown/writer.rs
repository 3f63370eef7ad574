//! Serialize slide records back to two-level Markdown.

use crate::model::SlideRecord;

/// Render slide records as Markdown that parses back to the same records.
///
/// Module bodies are written line by line with no separator after them, since
/// a trailing blank line would become part of the module content.
pub fn to_markdown(slides: &[SlideRecord]) -> String {
    let mut out = String::new();

    for slide in slides {
        out.push_str("# ");
        out.push_str(&slide.title);
        out.push('\n');

        if slide.has_description() {
            out.push_str(&slide.description);
            out.push('\n');
        }
        out.push('\n');

        for module in &slide.modules {
            out.push_str("## ");
            out.push_str(&module.title);
            out.push('\n');
            for line in module.content.split('\n') {
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    out
}
