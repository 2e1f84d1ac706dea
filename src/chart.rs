//! Assembles a full chart page: title block, organisation tree, footer.

use std::path::Path;

use crate::canvas::{Canvas, HAlign, Paragraph, Rect, Scene};
use crate::config::{Config, HeaderConfig};
use crate::draw::{DrawContext, draw_text_box, render_tree};
use crate::error::RenderError;
use crate::ir::{Document, FontWeight, FooterLegend};
use crate::render::{OutputFormat, write_output};
use crate::style::Rgb;

/// Draws `document` onto a fresh page-sized scene.
///
/// Nothing is written anywhere; a failure leaves no output behind.
pub fn render_chart(document: &Document, config: &Config) -> Result<Scene, RenderError> {
    let (width, height) = config.chart.preset.page_size();
    let mut scene = Scene::new(width, height);
    scene.background = Rgb::from_hex_or(&config.theme.background, Rgb::WHITE);
    let ctx = DrawContext::new(document.styles(), &config.theme, &config.chart);

    if config.chart.show_header {
        tracing::info!("rendering header");
        render_header(&mut scene, &ctx, &config.chart.header)?;
    }

    tracing::info!("rendering boxes and connections");
    render_tree(&mut scene, &ctx, &document.organizational_structure)?;

    if let Some(footer) = &document.footer_legend {
        tracing::info!("rendering footer");
        render_footer(&mut scene, &ctx, footer)?;
    }

    tracing::info!(
        shapes = scene.shapes.len(),
        lines = scene.lines.len(),
        "chart rendered"
    );
    Ok(scene)
}

/// Renders and, only once every box is drawn, persists to `output`.
pub fn render_to_path(
    document: &Document,
    config: &Config,
    output: &Path,
    format: OutputFormat,
) -> Result<Scene, RenderError> {
    let scene = render_chart(document, config)?;
    tracing::info!(path = %output.display(), "saving chart");
    write_output(&scene, config, output, format)?;
    Ok(scene)
}

fn render_header(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    header: &HeaderConfig,
) -> Result<(), RenderError> {
    let logo = Rect {
        x: header.logo_x,
        y: header.logo_y,
        width: header.logo_width,
        height: header.logo_height,
    };
    draw_text_box(
        canvas,
        logo,
        vec![Paragraph {
            text: header.logo_text.clone(),
            font: ctx.font(header.logo_font_size, true, false, Rgb::BLACK),
            align: HAlign::Left,
            line_spacing: 1.0,
        }],
    )?;

    let title = Rect {
        x: header.title_x,
        y: header.title_y,
        width: header.title_width,
        height: header.title_height,
    };
    let lines = header
        .title_lines
        .iter()
        .map(|line| Paragraph {
            text: line.clone(),
            font: ctx.font(header.title_font_size, false, false, Rgb::BLACK),
            align: HAlign::Left,
            line_spacing: 1.0,
        })
        .collect();
    draw_text_box(canvas, title, lines)?;
    Ok(())
}

fn render_footer(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    footer: &FooterLegend,
) -> Result<(), RenderError> {
    let content = &footer.content;
    let mut font = ctx.font(
        content.font_size,
        content.font_weight == FontWeight::Bold,
        false,
        content
            .color
            .as_deref()
            .map_or(Rgb::BLACK, |value| Rgb::from_hex_or(value, Rgb::BLACK)),
    );
    if let Some(family) = &content.font_family {
        font.family = family.clone();
    }
    let align = footer
        .style
        .text_align
        .as_deref()
        .map_or(HAlign::Left, HAlign::from_token);
    draw_text_box(
        canvas,
        ctx.rect(&footer.position),
        vec![Paragraph {
            text: content.text.clone(),
            font,
            align,
            line_spacing: 1.0,
        }],
    )?;
    Ok(())
}
