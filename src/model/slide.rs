//! Slide records produced by the Markdown parser.

use serde::{Deserialize, Serialize};

/// Number of modules placed in the left column.
pub const LEFT_COLUMN_MODULES: usize = 3;

/// Number of modules placed in the right column.
pub const RIGHT_COLUMN_MODULES: usize = 2;

/// One slide of the deck: a `# ` heading and everything under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// Slide title (text after `# `)
    pub title: String,

    /// Non-blank lines between the title and the first heading, newline-joined
    pub description: String,

    /// Modules in source order
    pub modules: Vec<ModuleRecord>,
}

impl SlideRecord {
    /// Create a slide with a title and nothing else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            modules: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a module.
    pub fn with_module(mut self, module: ModuleRecord) -> Self {
        self.modules.push(module);
        self
    }

    /// Check if the slide has a description.
    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    /// Modules rendered in the left column (first three).
    pub fn left_modules(&self) -> &[ModuleRecord] {
        let end = self.modules.len().min(LEFT_COLUMN_MODULES);
        &self.modules[..end]
    }

    /// Modules rendered in the right column (fourth and fifth).
    pub fn right_modules(&self) -> &[ModuleRecord] {
        let start = self.modules.len().min(LEFT_COLUMN_MODULES);
        let end = self
            .modules
            .len()
            .min(LEFT_COLUMN_MODULES + RIGHT_COLUMN_MODULES);
        &self.modules[start..end]
    }

    /// Number of modules that are parsed but never placed on the canvas.
    pub fn dropped_modules(&self) -> usize {
        self.modules
            .len()
            .saturating_sub(LEFT_COLUMN_MODULES + RIGHT_COLUMN_MODULES)
    }
}

/// A `## ` section inside a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Module title (text after `## `)
    pub title: String,

    /// Body lines, trimmed and newline-joined; blank lines are kept as empty segments
    pub content: String,
}

impl ModuleRecord {
    /// Create a module.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
