//! Rendering of pipeline results to text formats.

mod json;

pub use json::{to_json, JsonFormat};
