//! Chart document model.
//!
//! Mirrors the JSON documents the charts are authored as. Every structural
//! slot is optional: a missing list deserializes as empty, a missing box as
//! `None`. Box content is an untagged enum with a catch-all variant, so bad
//! content surfaces where the box is drawn. Zones and additional positions
//! are chosen by their keys and then deserialized strictly; a broken box
//! inside one fails the load rather than dropping its siblings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

use crate::error::RenderError;
use crate::style::StyleTable;

static LINE_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^line_(\d+)$").unwrap());

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub global_styles: GlobalStyles,
    #[serde(default)]
    pub organizational_structure: OrgStructure,
    #[serde(default)]
    pub footer_legend: Option<FooterLegend>,
}

impl Document {
    pub fn from_json(input: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn styles(&self) -> &StyleTable {
        &self.global_styles.box_styles
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalStyles {
    #[serde(default)]
    pub box_styles: StyleTable,
}

/// Top-left origin, y grows downward, abstract source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Bold,
    #[default]
    #[serde(other)]
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Italic,
    #[default]
    #[serde(other)]
    Normal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyedLine {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_keyed_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SequentialLine {
    #[serde(default)]
    pub line: String,
    #[serde(default = "default_sequential_font_size")]
    pub font_size: f32,
}

fn default_keyed_font_size() -> f32 {
    7.0
}

fn default_sequential_font_size() -> f32 {
    6.0
}

/// A `line_<n>` map. Entries stay raw until the box is drawn.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct KeyedLines {
    entries: BTreeMap<String, serde_json::Value>,
}

impl KeyedLines {
    /// Lines in `line_<n>` order: numeric suffixes ascending, anything else
    /// after them lexically. Keys without the `line_` prefix are ignored.
    /// Numeric on purpose: plain lexical order would put `line_10` before `line_2`.
    pub fn lines(&self) -> Result<Vec<KeyedLine>, serde_json::Error> {
        let mut keyed: Vec<(u64, &str, &serde_json::Value)> = self
            .entries
            .iter()
            .filter(|(key, _)| key.starts_with("line_"))
            .map(|(key, value)| (line_ordinal(key), key.as_str(), value))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
        keyed
            .into_iter()
            .map(|(_, _, value)| KeyedLine::deserialize(value))
            .collect()
    }
}

impl FromIterator<(String, serde_json::Value)> for KeyedLines {
    fn from_iter<T: IntoIterator<Item = (String, serde_json::Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn line_ordinal(key: &str) -> u64 {
    LINE_KEY_RE
        .captures(key)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Sequential(Vec<SequentialLine>),
    Keyed(KeyedLines),
    Unrecognized(serde_json::Value),
}

/// A styled, positioned chart box.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoxNode {
    #[serde(default)]
    pub id: Option<String>,
    pub position: Position,
    pub style: String,
    pub content: Content,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrgStructure {
    #[serde(default)]
    pub level_1_top_management: Option<BoxNode>,
    #[serde(default)]
    pub level_2_departments: Vec<BoxNode>,
    #[serde(default)]
    pub level_3_project_staff: Vec<BoxNode>,
    #[serde(default)]
    pub main_project_divisions: Option<MainDivisions>,
    #[serde(default)]
    pub additional_positions: Vec<AdditionalPosition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MainDivisions {
    #[serde(default)]
    pub division_header: Option<SectionHeader>,
    #[serde(default)]
    pub divisions: Vec<Division>,
}

/// Banner above the divisions; drawn with a fixed style.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionHeader {
    pub position: Position,
    pub content: HeaderText,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeaderText {
    pub text: String,
    #[serde(default = "default_keyed_font_size")]
    pub font_size: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Division {
    #[serde(default)]
    pub division_header: Option<BoxNode>,
    #[serde(default)]
    pub staff: Vec<BoxNode>,
    #[serde(default)]
    pub draftsmen: Vec<BoxNode>,
    #[serde(default)]
    pub driver: Option<BoxNode>,
    #[serde(default)]
    pub project_manager: Option<BoxNode>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// A zone is picked by its key: `zone_manager` or `zone_id`. Once picked,
/// it must deserialize in full; only entries with neither key are
/// `Unrecognized`.
#[derive(Debug, Clone)]
pub enum Zone {
    Managed(ManagedZone),
    Standalone(StandaloneZone),
    Unrecognized(serde_json::Value),
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("zone_manager").is_some() {
            strict(value).map(Zone::Managed)
        } else if value.get("zone_id").is_some() {
            strict(value).map(Zone::Standalone)
        } else {
            Ok(Zone::Unrecognized(value))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManagedZone {
    pub zone_manager: BoxNode,
    #[serde(default)]
    pub staff: Vec<BoxNode>,
    #[serde(default)]
    pub manpower_summary: Option<BoxNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandaloneZone {
    pub zone_id: String,
    pub position: Position,
    pub style: String,
    pub content: Content,
}

/// Dispatched on `positions`, then `content.title`, then `content`.
#[derive(Debug, Clone)]
pub enum AdditionalPosition {
    Group { positions: Vec<BoxNode> },
    Composite(CompositeBox),
    Single(BoxNode),
    Unrecognized(serde_json::Value),
}

impl<'de> Deserialize<'de> for AdditionalPosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = serde_json::Value::deserialize(deserializer)?;
        if let Some(positions) = value.get_mut("positions") {
            strict(positions.take()).map(|positions| AdditionalPosition::Group { positions })
        } else if let Some(content) = value.get("content") {
            if content.get("title").is_some() {
                strict(value).map(AdditionalPosition::Composite)
            } else {
                strict(value).map(AdditionalPosition::Single)
            }
        } else {
            Ok(AdditionalPosition::Unrecognized(value))
        }
    }
}

fn strict<T: DeserializeOwned, E: de::Error>(value: serde_json::Value) -> Result<T, E> {
    serde_json::from_value(value).map_err(E::custom)
}

/// Box with an inline look: bold title, a name list and an optional note.
#[derive(Debug, Clone, Deserialize)]
pub struct CompositeBox {
    pub position: Position,
    pub content: CompositeContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompositeContent {
    pub title: PlainText,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub additional: Option<PlainText>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlainText {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FooterLegend {
    pub position: Position,
    pub content: FooterText,
    #[serde(default)]
    pub style: FooterStyle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FooterText {
    pub text: String,
    #[serde(default = "default_footer_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub font_family: Option<String>,
}

fn default_footer_font_size() -> f32 {
    8.0
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FooterStyle {
    #[serde(default)]
    pub text_align: Option<String>,
}
