//! Canvas geometry in centimetres and colours.

use serde::{Deserialize, Serialize};

/// English Metric Units per centimetre.
pub const EMU_PER_CM: f64 = 360_000.0;

/// Centimetres per inch.
pub const CM_PER_INCH: f32 = 2.54;

/// Convert centimetres to EMU, rounding to the nearest unit.
pub fn cm_to_emu(cm: f32) -> i64 {
    (f64::from(cm) * EMU_PER_CM).round() as i64
}

/// Convert points to hundredths of a point (DrawingML `sz`).
pub fn pt_to_centipoints(pt: f32) -> u32 {
    (pt * 100.0).round().max(0.0) as u32
}

/// Axis-aligned rectangle on the slide, in centimetres from the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// 24-bit colour, serialized as a six-digit hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure white.
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    /// Pure black.
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    /// Dark red accent (`8B0000`).
    pub const DARK_RED: Rgb = Rgb(0x8B, 0x00, 0x00);

    /// Upper-case hex without `#`, as DrawingML expects.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Parse `RRGGBB` or `#RRGGBB`.
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let s = s.trim().trim_start_matches('#');
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex())
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value).ok_or_else(|| format!("invalid colour: {}", value))
    }
}
