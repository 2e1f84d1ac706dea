use crate::theme::Theme;
use crate::units::PagePreset;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The page title block drawn top-left. Positions and sizes are in inches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    pub logo_text: String,
    pub logo_font_size: f32,
    pub logo_x: f32,
    pub logo_y: f32,
    pub logo_width: f32,
    pub logo_height: f32,
    pub title_lines: Vec<String>,
    pub title_font_size: f32,
    pub title_x: f32,
    pub title_y: f32,
    pub title_width: f32,
    pub title_height: f32,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            logo_text: "BT GROUP".to_string(),
            logo_font_size: 16.0,
            logo_x: 0.3,
            logo_y: 0.2,
            logo_width: 1.5,
            logo_height: 0.4,
            title_lines: vec![
                "Projects Delivery".to_string(),
                "Organization Chart".to_string(),
            ],
            title_font_size: 10.0,
            title_x: 0.3,
            title_y: 0.55,
            title_width: 2.0,
            title_height: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub preset: PagePreset,
    /// Style used for the banner above the divisions.
    pub section_header_style: String,
    /// Id of the tier-2 department that parents the tier-3 staff row.
    pub staff_parent_id: String,
    /// Draw the title block. Off leaves the page header empty.
    pub show_header: bool,
    pub header: HeaderConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            preset: PagePreset::A3Landscape,
            section_header_style: "support_staff_white".to_string(),
            staff_parent_id: "projects_management".to_string(),
            show_header: true,
            header: HeaderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Measure text with the built-in Arial table instead of system fonts.
    pub fast_text_metrics: bool,
    /// Resolution used when rasterizing to PNG.
    pub png_dpi: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fast_text_metrics: false,
            png_dpi: 150.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub chart: ChartConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    preset: Option<String>,
    font_family: Option<String>,
    background: Option<String>,
    border_color: Option<String>,
    border_width: Option<f32>,
    connector_color: Option<String>,
    connector_width: Option<f32>,
    keyed_line_spacing: Option<f32>,
    sequential_line_spacing: Option<f32>,
    section_header_style: Option<String>,
    staff_parent_id: Option<String>,
    show_header: Option<bool>,
    header: Option<HeaderConfigFile>,
    fast_text_metrics: Option<bool>,
    png_dpi: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct HeaderConfigFile {
    logo_text: Option<String>,
    logo_font_size: Option<f32>,
    title_lines: Option<Vec<String>>,
    title_font_size: Option<f32>,
}

/// Loads the defaults, overridden by the JSON (or JSON5) file at `path`.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(token) = parsed.preset.as_deref() {
        config.chart.preset = PagePreset::from_token(token)
            .ok_or_else(|| anyhow::anyhow!("Unknown page preset `{}`", token))?;
    }
    if let Some(v) = parsed.font_family {
        config.theme.font_family = v;
    }
    if let Some(v) = parsed.background {
        config.theme.background = v;
    }
    if let Some(v) = parsed.border_color {
        config.theme.border_color = v;
    }
    if let Some(v) = parsed.border_width {
        config.theme.border_width = v;
    }
    if let Some(v) = parsed.connector_color {
        config.theme.connector_color = v;
    }
    if let Some(v) = parsed.connector_width {
        config.theme.connector_width = v;
    }
    if let Some(v) = parsed.keyed_line_spacing {
        config.theme.keyed_line_spacing = v;
    }
    if let Some(v) = parsed.sequential_line_spacing {
        config.theme.sequential_line_spacing = v;
    }
    if let Some(v) = parsed.section_header_style {
        config.chart.section_header_style = v;
    }
    if let Some(v) = parsed.staff_parent_id {
        config.chart.staff_parent_id = v;
    }
    if let Some(v) = parsed.show_header {
        config.chart.show_header = v;
    }
    if let Some(header) = parsed.header {
        if let Some(v) = header.logo_text {
            config.chart.header.logo_text = v;
        }
        if let Some(v) = header.logo_font_size {
            config.chart.header.logo_font_size = v;
        }
        if let Some(v) = header.title_lines {
            config.chart.header.title_lines = v;
        }
        if let Some(v) = header.title_font_size {
            config.chart.header.title_font_size = v;
        }
    }
    if let Some(v) = parsed.fast_text_metrics {
        config.render.fast_text_metrics = v;
    }
    if let Some(v) = parsed.png_dpi {
        config.render.png_dpi = v;
    }

    Ok(config)
}
