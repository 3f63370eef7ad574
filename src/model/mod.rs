//! Data model shared by the two pipelines.
//!
//! Slide records and inline spans feed the layout engine; regions flow
//! through the figure detectors and merger. All records are plain owned
//! values that serialize to JSON.

mod inline;
mod region;
mod slide;

pub use inline::{Paragraph, TextSpan};
pub use region::{DrawingGroup, Region};
pub use slide::{ModuleRecord, SlideRecord, LEFT_COLUMN_MODULES, RIGHT_COLUMN_MODULES};
