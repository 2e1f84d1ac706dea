pub mod canvas;
pub mod chart;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod draw;
pub mod error;
pub mod ir;
pub mod render;
pub mod scene_dump;
pub mod style;
pub mod text;
pub mod text_metrics;
pub mod theme;
pub mod units;

pub use canvas::{Canvas, Scene};
pub use chart::{render_chart, render_to_path};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config, parse_config};
pub use error::RenderError;
pub use ir::Document;
pub use render::{OutputFormat, render_svg};
pub use theme::Theme;
pub use units::{PagePreset, Units};

/// Renders a chart document (JSON text) straight to an SVG string.
pub fn render_document_svg(json: &str, config: &Config) -> Result<String, RenderError> {
    let document = Document::from_json(json)?;
    let scene = render_chart(&document, config)?;
    Ok(render_svg(&scene, &config.render))
}
