//! Slide layout engine.
//!
//! Slide records are placed on a fixed 16:9 canvas as absolutely positioned
//! boxes. All geometry is in centimetres; conversion to EMU happens in the
//! package writer.

mod calculator;
mod estimate;
mod geometry;
mod options;

pub use calculator::{
    compute_deck, compute_layout, Alignment, Anchor, BoxKind, FontSpec, SlideLayout, TextBox,
};
pub use estimate::estimate_text_height;
pub use geometry::{cm_to_emu, pt_to_centipoints, Rect, Rgb, CM_PER_INCH, EMU_PER_CM};
pub use options::{ColumnSpec, HeightPolicy, LayoutOptions, Theme, DEFAULT_FONT_FAMILY};
