use serde::{Deserialize, Serialize};

/// Page-wide drawing defaults. Box colors come from the document's style
/// table; everything a style cannot express lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub border_color: String,
    /// Box outline width in points.
    pub border_width: f32,
    pub connector_color: String,
    /// Connector stroke width in points.
    pub connector_width: f32,
    /// Line spacing multiplier for keyed-line boxes.
    pub keyed_line_spacing: f32,
    /// Line spacing multiplier for sequential-line boxes.
    pub sequential_line_spacing: f32,
}

impl Theme {
    /// Arial on white, hairline black borders and connectors.
    pub fn office() -> Self {
        Self {
            font_family: "Arial".to_string(),
            background: "#FFFFFF".to_string(),
            border_color: "#000000".to_string(),
            border_width: 0.5,
            connector_color: "#000000".to_string(),
            connector_width: 0.5,
            keyed_line_spacing: 0.9,
            sequential_line_spacing: 1.0,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::office()
    }
}
