//! Layout options and theme.

use super::geometry::{Rect, Rgb, CM_PER_INCH};

/// Default font family for every text box.
pub const DEFAULT_FONT_FAMILY: &str = "Microsoft YaHei";

/// Colours and typeface shared by all slides.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Title text and bar fill colour
    pub accent: Rgb,

    /// Text colour on accent bars
    pub bar_text: Rgb,

    /// Module body text colour
    pub body_text: Rgb,

    /// Latin and East Asian typeface
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Rgb::DARK_RED,
            bar_text: Rgb::WHITE,
            body_text: Rgb::BLACK,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

/// How module content boxes are sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeightPolicy {
    /// Per-column constant height
    #[default]
    Fixed,
    /// Column constant or the estimated text height, whichever is larger
    Estimated,
}

impl std::str::FromStr for HeightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(HeightPolicy::Fixed),
            "estimated" | "estimate" | "dynamic" => Ok(HeightPolicy::Estimated),
            other => Err(format!("unknown height policy: {}", other)),
        }
    }
}

/// Geometry of one module column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    /// Left edge of title bar and content box
    pub x: f32,

    /// Fixed content box height
    pub content_height: f32,
}

/// Options controlling slide layout.
///
/// All lengths are centimetres and font sizes are points.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Canvas width (13.33 in)
    pub canvas_width: f32,

    /// Canvas height (7.5 in)
    pub canvas_height: f32,

    /// Colours and typeface
    pub theme: Theme,

    /// Slide title text box
    pub title_rect: Rect,

    /// Slide title size
    pub title_font_pt: f32,

    /// Description bar
    pub description_rect: Rect,

    /// Description text size
    pub description_font_pt: f32,

    /// Left column
    pub left_column: ColumnSpec,

    /// Right column
    pub right_column: ColumnSpec,

    /// Top of the first module in each column
    pub column_top: f32,

    /// Module title bar width
    pub module_title_width: f32,

    /// Module title bar height
    pub module_title_height: f32,

    /// Module title text size
    pub module_title_font_pt: f32,

    /// Module content box width
    pub content_width: f32,

    /// Module content text size
    pub content_font_pt: f32,

    /// Vertical gap after each module
    pub module_gap: f32,

    /// Content box sizing policy
    pub height_policy: HeightPolicy,

    /// Line spacing multiplier for the height estimate
    pub line_spacing: f32,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content height policy.
    pub fn with_height_policy(mut self, policy: HeightPolicy) -> Self {
        self.height_policy = policy;
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.theme.font_family = family.into();
        self
    }

    /// Set the accent colour.
    pub fn with_accent(mut self, accent: Rgb) -> Self {
        self.theme.accent = accent;
        self
    }

    /// Set the line spacing used by the height estimate.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing.max(0.1);
        self
    }

    /// Set the gap between modules.
    pub fn with_module_gap(mut self, gap: f32) -> Self {
        self.module_gap = gap.max(0.0);
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            canvas_width: 13.33 * CM_PER_INCH,
            canvas_height: 7.5 * CM_PER_INCH,
            theme: Theme::default(),
            title_rect: Rect::new(0.0, 0.0, 30.0, 1.5),
            title_font_pt: 18.0,
            description_rect: Rect::new(0.0, 1.7, 34.0, 0.6),
            description_font_pt: 7.0,
            left_column: ColumnSpec {
                x: 1.0,
                content_height: 4.2,
            },
            right_column: ColumnSpec {
                x: 16.0,
                content_height: 6.0,
            },
            column_top: 3.0,
            module_title_width: 6.0,
            module_title_height: 0.8,
            module_title_font_pt: 14.0,
            content_width: 14.5,
            content_font_pt: 12.0,
            module_gap: 0.3,
            height_policy: HeightPolicy::Fixed,
            line_spacing: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LayoutOptions::default();
        assert!((options.canvas_width - 33.8582).abs() < 1e-3);
        assert!((options.canvas_height - 19.05).abs() < 1e-3);
        assert_eq!(options.theme.accent.hex(), "8B0000");
        assert_eq!(options.theme.font_family, "Microsoft YaHei");
        assert_eq!(options.height_policy, HeightPolicy::Fixed);
        assert_eq!(options.left_column.content_height, 4.2);
        assert_eq!(options.right_column.content_height, 6.0);
    }

    #[test]
    fn test_builder() {
        let options = LayoutOptions::new()
            .with_height_policy(HeightPolicy::Estimated)
            .with_font_family("Arial")
            .with_module_gap(-1.0);
        assert_eq!(options.height_policy, HeightPolicy::Estimated);
        assert_eq!(options.theme.font_family, "Arial");
        assert_eq!(options.module_gap, 0.0);
    }

    #[test]
    fn test_height_policy_from_str() {
        assert_eq!("fixed".parse::<HeightPolicy>(), Ok(HeightPolicy::Fixed));
        assert_eq!("Estimated".parse::<HeightPolicy>(), Ok(HeightPolicy::Estimated));
        assert!("auto".parse::<HeightPolicy>().is_err());
    }
}
