//! JSON rendering for layouts and extraction manifests.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any value to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_deck, LayoutOptions};
    use crate::model::{ModuleRecord, Region, SlideRecord};

    #[test]
    fn test_to_json_pretty() {
        let slide = SlideRecord::new("Test")
            .with_module(ModuleRecord::new("Method", "a **b**"));
        let layouts = compute_deck(&[slide], &LayoutOptions::default());

        let json = to_json(&layouts, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Test"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let regions = [Region::new(0.0, 0.0, 10.0, 20.0)];
        let json = to_json(&regions[..], JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
        assert_eq!(json, r#"[{"x0":0.0,"y0":0.0,"x1":10.0,"y1":20.0}]"#);
    }
}
