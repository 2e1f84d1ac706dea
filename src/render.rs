use crate::canvas::{HAlign, Scene, Shape, VAnchor};
use crate::config::{Config, RenderConfig};
use crate::error::RenderError;
use crate::text::{SINGLE_LINE_HEIGHT, wrap_text};
use std::path::Path;

const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// Serializes the scene as SVG. The page is sized in inches; user units are
/// points, so font sizes and stroke widths carry over unchanged.
pub fn render_svg(scene: &Scene, config: &RenderConfig) -> String {
    let width = scene.width * POINTS_PER_INCH;
    let height = scene.height * POINTS_PER_INCH;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}in\" height=\"{}in\" viewBox=\"0 0 {width:.2} {height:.2}\">",
        scene.width, scene.height,
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        scene.background
    ));

    for shape in &scene.shapes {
        svg.push_str(&shape_svg(shape, config));
    }

    for line in &scene.lines {
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"square\"/>",
            line.from.x * POINTS_PER_INCH,
            line.from.y * POINTS_PER_INCH,
            line.to.x * POINTS_PER_INCH,
            line.to.y * POINTS_PER_INCH,
            line.stroke.color,
            line.stroke.width
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn shape_svg(shape: &Shape, config: &RenderConfig) -> String {
    let x = shape.rect.x * POINTS_PER_INCH;
    let y = shape.rect.y * POINTS_PER_INCH;
    let width = shape.rect.width * POINTS_PER_INCH;
    let height = shape.rect.height * POINTS_PER_INCH;
    let mut out = String::new();

    if shape.fill.is_some() || shape.border.is_some() {
        let fill = shape
            .fill
            .map_or_else(|| "none".to_string(), |color| color.to_string());
        let stroke = shape.border.map_or_else(String::new, |border| {
            format!(" stroke=\"{}\" stroke-width=\"{}\"", border.color, border.width)
        });
        out.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{fill}\"{stroke}/>",
        ));
    }

    let frame = &shape.frame;
    let inner_x = x + frame.margin_left * POINTS_PER_INCH;
    let inner_y = y + frame.margin_top * POINTS_PER_INCH;
    let inner_width = width - (frame.margin_left + frame.margin_right) * POINTS_PER_INCH;
    let inner_height = height - (frame.margin_top + frame.margin_bottom) * POINTS_PER_INCH;
    let wrap_width = if frame.word_wrap {
        inner_width.max(0.0)
    } else {
        f32::INFINITY
    };

    let blocks: Vec<(Vec<String>, f32)> = shape
        .paragraphs
        .iter()
        .map(|paragraph| {
            let lines = wrap_text(
                &paragraph.text,
                &paragraph.font,
                wrap_width,
                config.fast_text_metrics,
            );
            let line_height = paragraph.font.size * SINGLE_LINE_HEIGHT * paragraph.line_spacing;
            (lines, line_height)
        })
        .collect();
    let total_height: f32 = blocks
        .iter()
        .map(|(lines, line_height)| lines.len() as f32 * line_height)
        .sum();

    let mut cursor = match frame.anchor {
        VAnchor::Top => inner_y,
        VAnchor::Middle => inner_y + (inner_height - total_height) / 2.0,
    };

    for (paragraph, (lines, line_height)) in shape.paragraphs.iter().zip(&blocks) {
        let (text_x, anchor) = match paragraph.align {
            HAlign::Left => (inner_x, "start"),
            HAlign::Center => (inner_x + inner_width / 2.0, "middle"),
            HAlign::Right => (inner_x + inner_width, "end"),
        };
        let font = &paragraph.font;
        let weight = if font.bold { " font-weight=\"bold\"" } else { "" };
        let style = if font.italic { " font-style=\"italic\"" } else { "" };
        for line in lines {
            // baseline sits a little below the middle of the line box
            let baseline = cursor + line_height / 2.0 + font.size * 0.35;
            cursor += line_height;
            if line.is_empty() {
                continue;
            }
            out.push_str(&format!(
                "<text x=\"{text_x:.2}\" y=\"{baseline:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{}\"{weight}{style} fill=\"{}\">{}</text>",
                escape_xml(&font.family),
                font.size,
                font.color,
                escape_xml(line)
            ));
        }
    }

    out
}

/// Writes the scene in `format`. The bytes are produced in full before the
/// destination is touched, then swapped in with a rename.
pub fn write_output(
    scene: &Scene,
    config: &Config,
    output: &Path,
    format: OutputFormat,
) -> Result<(), RenderError> {
    let svg = render_svg(scene, &config.render);
    let bytes = match format {
        OutputFormat::Svg => svg.into_bytes(),
        OutputFormat::Png => rasterize_png(&svg, &config.render, &config.theme.font_family)?,
    };
    write_atomically(output, &bytes)
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<(), RenderError> {
    match output {
        Some(path) => write_atomically(path, svg.as_bytes())?,
        None => print!("{}", svg),
    }
    Ok(())
}

#[cfg(feature = "png")]
fn rasterize_png(svg: &str, render_cfg: &RenderConfig, font_family: &str) -> Result<Vec<u8>, RenderError> {
    let mut opt = usvg::Options::default();
    opt.font_family = font_family.to_string();
    opt.dpi = render_cfg.png_dpi;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|err| RenderError::Raster(err.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| RenderError::Raster("failed to allocate pixmap".to_string()))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap
        .encode_png()
        .map_err(|err| RenderError::Raster(err.to_string()))
}

#[cfg(not(feature = "png"))]
fn rasterize_png(_svg: &str, _render_cfg: &RenderConfig, _font_family: &str) -> Result<Vec<u8>, RenderError> {
    Err(RenderError::Raster(
        "PNG output requires the `png` feature".to_string(),
    ))
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("chart");
    let staging = path.with_file_name(format!(".{file_name}.partial"));
    if let Err(err) = std::fs::write(&staging, bytes).and_then(|_| std::fs::rename(&staging, path)) {
        let _ = std::fs::remove_file(&staging);
        return Err(err.into());
    }
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
