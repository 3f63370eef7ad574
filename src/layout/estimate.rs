//! Rough text height estimate.

/// Approximate glyph width as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Centimetres per point used for line height.
const CM_PER_POINT: f32 = 0.035;

/// Estimate the height in centimetres of `text` wrapped at `width_cm`.
///
/// Characters per line is `floor(width_cm * 10 / (font_pt * 0.6))`, never less
/// than one. The line count is `chars / chars_per_line + 1`, so even empty text
/// occupies one line.
pub fn estimate_text_height(text: &str, width_cm: f32, font_pt: f32, line_spacing: f32) -> f32 {
    let chars_per_line = chars_per_line(width_cm, font_pt);
    let lines = text.chars().count() / chars_per_line + 1;
    lines as f32 * font_pt * CM_PER_POINT * line_spacing
}

fn chars_per_line(width_cm: f32, font_pt: f32) -> usize {
    if font_pt <= 0.0 {
        return 1;
    }
    let raw = (width_cm * 10.0 / (font_pt * GLYPH_WIDTH_RATIO)).floor();
    if raw.is_finite() && raw >= 1.0 {
        raw as usize
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars_per_line() {
        // 14.5 * 10 / (10 * 0.6) = 24.17
        assert_eq!(chars_per_line(14.5, 10.0), 24);
        assert_eq!(chars_per_line(0.1, 72.0), 1);
        assert_eq!(chars_per_line(10.0, 0.0), 1);
    }

    #[test]
    fn test_estimate_empty() {
        let h = estimate_text_height("", 14.5, 10.0, 1.0);
        assert!((h - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_estimate_wraps() {
        let text = "x".repeat(48);
        // 48 / 24 + 1 = 3 lines of 10 pt
        let h = estimate_text_height(&text, 14.5, 10.0, 1.0);
        assert!((h - 1.05).abs() < 1e-5);

        let spaced = estimate_text_height(&text, 14.5, 10.0, 1.5);
        assert!((spaced - 1.575).abs() < 1e-5);
    }

    #[test]
    fn test_estimate_counts_chars_not_bytes() {
        let cjk = "图".repeat(24);
        let h = estimate_text_height(&cjk, 14.5, 10.0, 1.0);
        assert!((h - 0.7).abs() < 1e-5);
    }
}
