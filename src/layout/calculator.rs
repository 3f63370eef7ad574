//! Slide layout computation.

use serde::{Deserialize, Serialize};

use super::estimate::estimate_text_height;
use super::geometry::{Rect, Rgb};
use super::options::{ColumnSpec, HeightPolicy, LayoutOptions};
use crate::markdown::{plain_paragraphs, to_paragraphs};
use crate::model::{ModuleRecord, Paragraph, SlideRecord};

/// Role of a box on the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxKind {
    /// Slide title text box
    Title,
    /// Filled description bar under the title
    Description,
    /// Filled module title bar
    ModuleTitle,
    /// Module body text box
    ModuleContent,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Left aligned
    #[default]
    Left,
    /// Centered
    Center,
    /// Right aligned
    Right,
}

/// Vertical anchoring of text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Text starts at the top edge
    #[default]
    Top,
    /// Text is vertically centered
    Middle,
}

/// Typeface, size and colour of a box's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Typeface name
    pub family: String,
    /// Size in points
    pub size_pt: f32,
    /// Text colour
    pub color: Rgb,
}

/// One positioned shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    /// Role on the slide
    pub kind: BoxKind,
    /// Position and size in centimetres
    pub rect: Rect,
    /// Background fill; `None` is transparent
    pub fill: Option<Rgb>,
    /// Text styling
    pub font: FontSpec,
    /// Horizontal alignment
    pub alignment: Alignment,
    /// Vertical anchoring
    pub anchor: Anchor,
    /// Wrap text at the box width
    pub word_wrap: bool,
    /// Paragraphs in order
    pub paragraphs: Vec<Paragraph>,
}

/// All boxes of one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideLayout {
    /// Slide title, for reporting
    pub title: String,
    /// Boxes in drawing order
    pub boxes: Vec<TextBox>,
}

impl SlideLayout {
    /// Lowest bottom edge of any box.
    pub fn bottom(&self) -> f32 {
        self.boxes
            .iter()
            .map(|b| b.rect.bottom())
            .fold(0.0, f32::max)
    }

    /// Check if any box extends past the canvas bottom.
    ///
    /// Overflow is reported, never corrected.
    pub fn overflows(&self, canvas_height: f32) -> bool {
        self.bottom() > canvas_height
    }

    /// Boxes of a given kind.
    pub fn boxes_of(&self, kind: BoxKind) -> impl Iterator<Item = &TextBox> {
        self.boxes.iter().filter(move |b| b.kind == kind)
    }
}

/// Compute the boxes for one slide.
///
/// Title and description bar come first, then the left column (modules 1-3)
/// and the right column (modules 4-5). Each column stacks title bar and content
/// box pairs from `column_top`; later modules are ignored.
pub fn compute_layout(slide: &SlideRecord, options: &LayoutOptions) -> SlideLayout {
    let mut boxes = Vec::with_capacity(2 + 2 * slide.modules.len().min(5));
    let theme = &options.theme;

    boxes.push(TextBox {
        kind: BoxKind::Title,
        rect: options.title_rect,
        fill: None,
        font: FontSpec {
            family: theme.font_family.clone(),
            size_pt: options.title_font_pt,
            color: theme.accent,
        },
        alignment: Alignment::Left,
        anchor: Anchor::Top,
        word_wrap: false,
        paragraphs: vec![Paragraph::with_text(&slide.title)],
    });

    boxes.push(TextBox {
        kind: BoxKind::Description,
        rect: options.description_rect,
        fill: Some(theme.accent),
        font: FontSpec {
            family: theme.font_family.clone(),
            size_pt: options.description_font_pt,
            color: theme.bar_text,
        },
        alignment: Alignment::Left,
        anchor: Anchor::Middle,
        word_wrap: true,
        paragraphs: plain_paragraphs(&slide.description),
    });

    place_column(&mut boxes, slide.left_modules(), &options.left_column, options);
    place_column(&mut boxes, slide.right_modules(), &options.right_column, options);

    let dropped = slide.dropped_modules();
    if dropped > 0 {
        log::warn!(
            "Slide '{}' has {} modules; {} beyond the fifth are not placed",
            slide.title,
            slide.modules.len(),
            dropped
        );
    }

    SlideLayout {
        title: slide.title.clone(),
        boxes,
    }
}

/// Compute layouts for a whole deck.
pub fn compute_deck(slides: &[SlideRecord], options: &LayoutOptions) -> Vec<SlideLayout> {
    slides
        .iter()
        .map(|slide| compute_layout(slide, options))
        .collect()
}

fn place_column(
    boxes: &mut Vec<TextBox>,
    modules: &[ModuleRecord],
    column: &ColumnSpec,
    options: &LayoutOptions,
) {
    let theme = &options.theme;
    let mut cursor = options.column_top;

    for module in modules {
        boxes.push(TextBox {
            kind: BoxKind::ModuleTitle,
            rect: Rect::new(
                column.x,
                cursor,
                options.module_title_width,
                options.module_title_height,
            ),
            fill: Some(theme.accent),
            font: FontSpec {
                family: theme.font_family.clone(),
                size_pt: options.module_title_font_pt,
                color: theme.bar_text,
            },
            alignment: Alignment::Left,
            anchor: Anchor::Middle,
            word_wrap: true,
            paragraphs: vec![Paragraph::with_text(&module.title)],
        });

        let content_height = content_height(&module.content, column, options);
        boxes.push(TextBox {
            kind: BoxKind::ModuleContent,
            rect: Rect::new(
                column.x,
                cursor + options.module_title_height,
                options.content_width,
                content_height,
            ),
            fill: None,
            font: FontSpec {
                family: theme.font_family.clone(),
                size_pt: options.content_font_pt,
                color: theme.body_text,
            },
            alignment: Alignment::Left,
            anchor: Anchor::Top,
            word_wrap: true,
            paragraphs: to_paragraphs(&module.content),
        });

        cursor += options.module_title_height + content_height + options.module_gap;
    }
}

fn content_height(content: &str, column: &ColumnSpec, options: &LayoutOptions) -> f32 {
    match options.height_policy {
        HeightPolicy::Fixed => column.content_height,
        HeightPolicy::Estimated => {
            let estimate = estimate_text_height(
                content,
                options.content_width,
                options.content_font_pt,
                options.line_spacing,
            );
            column.content_height.max(estimate)
        }
    }
}
