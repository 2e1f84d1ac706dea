use serde::{Deserialize, Serialize};

/// Width of the abstract pixel space chart documents are authored in.
pub const SOURCE_WIDTH: f32 = 1200.0;
/// Height of the abstract pixel space chart documents are authored in.
pub const SOURCE_HEIGHT: f32 = 750.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PagePreset {
    /// A3 landscape, 16.54" x 11.69".
    #[default]
    #[serde(alias = "a3")]
    A3Landscape,
    /// The smaller 11.71" x 8.28" page the charts were first exported at.
    #[serde(alias = "pdf")]
    Compact,
}

impl PagePreset {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "a3" | "a3landscape" | "a3-landscape" => Some(Self::A3Landscape),
            "compact" | "pdf" => Some(Self::Compact),
            _ => None,
        }
    }

    /// Page size in inches as `(width, height)`.
    pub fn page_size(self) -> (f32, f32) {
        match self {
            Self::A3Landscape => (16.54, 11.69),
            Self::Compact => (11.71, 8.28),
        }
    }
}

/// Linear mapping from source pixels to inches.
///
/// X and Y scale independently because the source space and the page do not
/// share an aspect ratio. Nothing is rounded or clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Units {
    pub fn new(scale_x: f32, scale_y: f32) -> Self {
        Self { scale_x, scale_y }
    }

    pub fn for_preset(preset: PagePreset) -> Self {
        let (width, height) = preset.page_size();
        Self::new(width / SOURCE_WIDTH, height / SOURCE_HEIGHT)
    }

    pub fn to_x(&self, px: f32) -> f32 {
        px * self.scale_x
    }

    pub fn to_y(&self, px: f32) -> f32 {
        px * self.scale_y
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::for_preset(PagePreset::default())
    }
}
