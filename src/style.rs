use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

    /// Parses `#RRGGBB` (the `#` is optional).
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parses `value`, logging and falling back to `default` when it is not a color.
    pub fn from_hex_or(value: &str, default: Rgb) -> Self {
        Self::from_hex(value).unwrap_or_else(|| {
            tracing::warn!(color = value, "unparseable color, using {}", default);
            default
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One entry of the document's `box_styles` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxStyle {
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub background: Rgb,
    pub text: Rgb,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            text: Rgb::BLACK,
        }
    }
}

/// Named box styles. Lookups never fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTable {
    styles: BTreeMap<String, BoxStyle>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, style: BoxStyle) {
        self.styles.insert(name.into(), style);
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn resolve(&self, name: &str) -> ResolvedStyle {
        let fallback = ResolvedStyle::default();
        let Some(style) = self.styles.get(name) else {
            tracing::warn!(style = name, "unknown box style, using white/black");
            return fallback;
        };
        ResolvedStyle {
            background: style
                .background_color
                .as_deref()
                .map_or(fallback.background, |value| {
                    Rgb::from_hex_or(value, fallback.background)
                }),
            text: style
                .text_color
                .as_deref()
                .map_or(fallback.text, |value| Rgb::from_hex_or(value, fallback.text)),
        }
    }
}
