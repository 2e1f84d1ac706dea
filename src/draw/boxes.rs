use crate::canvas::{Canvas, HAlign, Paragraph, Rect, ShapeId, TextFrame};
use crate::error::RenderError;
use crate::ir::{
    BoxNode, CompositeBox, Content, FontStyle, FontWeight, KeyedLine, Position, SectionHeader,
    SequentialLine,
};
use crate::style::{ResolvedStyle, Rgb};

use super::DrawContext;

const COMPOSITE_TITLE_SIZE: f32 = 7.0;
const COMPOSITE_NAMES_SIZE: f32 = 5.0;
const COMPOSITE_NOTE_SIZE: f32 = 6.0;

pub fn draw_node(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    node: &BoxNode,
) -> Result<ShapeId, RenderError> {
    draw_box(canvas, ctx, &node.position, &node.style, &node.content)
}

/// Draws one styled chart box with its text.
///
/// Content is validated before anything is drawn, so a malformed box leaves
/// the canvas untouched.
pub fn draw_box(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    position: &Position,
    style_name: &str,
    content: &Content,
) -> Result<ShapeId, RenderError> {
    let style = ctx.styles.resolve(style_name);
    let paragraphs = match content {
        Content::Keyed(lines) => {
            let lines = lines
                .lines()
                .map_err(|_| RenderError::MalformedContent {
                    style: style_name.to_string(),
                })?;
            keyed_paragraphs(ctx, &style, &lines)
        }
        Content::Sequential(lines) => sequential_paragraphs(ctx, &style, lines),
        Content::Unrecognized(_) => {
            return Err(RenderError::MalformedContent {
                style: style_name.to_string(),
            });
        }
    };
    tracing::debug!(style = style_name, paragraphs = paragraphs.len(), "box");
    fill_shape(
        canvas,
        ctx.rect(position),
        Some(style.background),
        TextFrame::chart_box(),
        ctx,
        paragraphs,
    )
}

fn keyed_paragraphs(ctx: &DrawContext<'_>, style: &ResolvedStyle, lines: &[KeyedLine]) -> Vec<Paragraph> {
    lines
        .iter()
        .map(|line| {
            let color = line
                .color
                .as_deref()
                .map_or(style.text, |value| Rgb::from_hex_or(value, style.text));
            Paragraph {
                text: line.text.clone(),
                font: ctx.font(
                    line.font_size,
                    line.font_weight == FontWeight::Bold,
                    line.font_style == FontStyle::Italic,
                    color,
                ),
                align: HAlign::Center,
                line_spacing: ctx.theme.keyed_line_spacing,
            }
        })
        .collect()
}

// Per-line colors are not honoured for this shape; the style decides.
fn sequential_paragraphs(
    ctx: &DrawContext<'_>,
    style: &ResolvedStyle,
    lines: &[SequentialLine],
) -> Vec<Paragraph> {
    lines
        .iter()
        .map(|line| Paragraph {
            text: line.line.clone(),
            font: ctx.font(line.font_size, false, false, style.text),
            align: HAlign::Center,
            line_spacing: ctx.theme.sequential_line_spacing,
        })
        .collect()
}

/// The banner over the divisions: one line in the configured header style.
pub fn draw_section_header(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    header: &SectionHeader,
) -> Result<ShapeId, RenderError> {
    let style = ctx.styles.resolve(&ctx.chart.section_header_style);
    let paragraph = Paragraph {
        text: header.content.text.clone(),
        font: ctx.font(header.content.font_size, false, false, style.text),
        align: HAlign::Center,
        line_spacing: ctx.theme.keyed_line_spacing,
    };
    fill_shape(
        canvas,
        ctx.rect(&header.position),
        Some(style.background),
        TextFrame::chart_box(),
        ctx,
        vec![paragraph],
    )
}

/// White box with a bold title, the comma-joined names and an optional note.
pub fn draw_composite(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    composite: &CompositeBox,
) -> Result<ShapeId, RenderError> {
    let content = &composite.content;
    let centered = |text: String, size: f32, bold: bool| Paragraph {
        text,
        font: ctx.font(size, bold, false, Rgb::BLACK),
        align: HAlign::Center,
        line_spacing: 1.0,
    };
    let mut paragraphs = vec![
        centered(content.title.text.clone(), COMPOSITE_TITLE_SIZE, true),
        centered(content.names.join(", "), COMPOSITE_NAMES_SIZE, false),
    ];
    if let Some(note) = &content.additional {
        paragraphs.push(centered(note.text.clone(), COMPOSITE_NOTE_SIZE, false));
    }
    fill_shape(
        canvas,
        ctx.rect(&composite.position),
        Some(Rgb::WHITE),
        TextFrame::composite_box(),
        ctx,
        paragraphs,
    )
}

/// Borderless, unfilled text placed at `rect` (page inches).
pub fn draw_text_box(
    canvas: &mut dyn Canvas,
    rect: Rect,
    paragraphs: Vec<Paragraph>,
) -> Result<ShapeId, RenderError> {
    let shape = canvas.add_rectangle(rect, None, None, TextFrame::text_box());
    for paragraph in paragraphs {
        canvas.add_text_paragraph(shape, paragraph)?;
    }
    Ok(shape)
}

fn fill_shape(
    canvas: &mut dyn Canvas,
    rect: Rect,
    fill: Option<Rgb>,
    frame: TextFrame,
    ctx: &DrawContext<'_>,
    paragraphs: Vec<Paragraph>,
) -> Result<ShapeId, RenderError> {
    let shape = canvas.add_rectangle(rect, fill, Some(ctx.border()), frame);
    for paragraph in paragraphs {
        canvas.add_text_paragraph(shape, paragraph)?;
    }
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Scene, VAnchor};
    use crate::config::ChartConfig;
    use crate::ir::{CompositeContent, PlainText};
    use crate::style::{BoxStyle, StyleTable};
    use crate::theme::Theme;
    use crate::units::PagePreset;

    fn styles() -> StyleTable {
        let mut styles = StyleTable::new();
        styles.insert(
            "dept",
            BoxStyle {
                background_color: Some("#FFC000".to_string()),
                text_color: Some("#1F3864".to_string()),
            },
        );
        styles
    }

    fn content(json: &str) -> Content {
        serde_json::from_str(json).expect("content")
    }

    fn position() -> Position {
        Position::new(120.0, 75.0, 240.0, 150.0)
    }

    #[test]
    fn keyed_box_renders_lines_in_key_order() {
        let (styles, theme, chart) = (styles(), Theme::default(), ChartConfig::default());
        let ctx = DrawContext::new(&styles, &theme, &chart);
        let mut scene = Scene::new(16.54, 11.69);
        let id = draw_box(
            &mut scene,
            &ctx,
            &position(),
            "dept",
            &content(
                r##"{"line_2": {"text": "Eng. Ali", "font_size": 6, "font_style": "italic"},
                    "line_1": {"text": "Projects", "font_size": 8, "font_weight": "bold", "color": "#C00000"}}"##,
            ),
        )
        .expect("box");

        let shape = scene.shape(id).expect("shape");
        assert_eq!(shape.fill, Some(Rgb(0xFF, 0xC0, 0x00)));
        assert_eq!(shape.border.map(|b| b.color), Some(Rgb::BLACK));
        assert_eq!(shape.frame.anchor, VAnchor::Middle);
        let texts: Vec<&str> = shape.paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["Projects", "Eng. Ali"]);

        let first = &shape.paragraphs[0];
        assert!(first.font.bold);
        assert_eq!(first.font.color, Rgb(0xC0, 0x00, 0x00));
        assert_eq!(first.font.size, 8.0);
        assert_eq!(first.align, HAlign::Center);

        let second = &shape.paragraphs[1];
        assert!(second.font.italic);
        assert_eq!(second.font.color, Rgb(0x1F, 0x38, 0x64));
    }

    #[test]
    fn box_geometry_goes_through_units() {
        let (styles, theme) = (styles(), Theme::default());
        let chart = ChartConfig {
            preset: PagePreset::Compact,
            ..ChartConfig::default()
        };
        let ctx = DrawContext::new(&styles, &theme, &chart);
        let mut scene = Scene::new(11.71, 8.28);
        let id = draw_box(&mut scene, &ctx, &position(), "dept", &content("[]")).expect("box");
        let rect = scene.shape(id).expect("shape").rect;
        assert!((rect.x - 120.0 * 11.71 / 1200.0).abs() < 1e-5);
        assert!((rect.y - 75.0 * 8.28 / 750.0).abs() < 1e-5);
        assert!((rect.width - 240.0 * 11.71 / 1200.0).abs() < 1e-5);
        assert!((rect.height - 150.0 * 8.28 / 750.0).abs() < 1e-5);
    }

    #[test]
    fn sequential_box_ignores_line_colors() {
        let (styles, theme, chart) = (styles(), Theme::default(), ChartConfig::default());
        let ctx = DrawContext::new(&styles, &theme, &chart);
        let mut scene = Scene::new(16.54, 11.69);
        let id = draw_box(
            &mut scene,
            &ctx,
            &position(),
            "dept",
            &content(r##"[{"line": "Zone 2", "font_size": 5, "color": "#FF0000"}, {"line": "12 staff"}]"##),
        )
        .expect("box");
        let shape = scene.shape(id).expect("shape");
        assert_eq!(shape.paragraphs.len(), 2);
        for paragraph in &shape.paragraphs {
            assert_eq!(paragraph.font.color, Rgb(0x1F, 0x38, 0x64));
        }
        assert_eq!(shape.paragraphs[0].font.size, 5.0);
        assert_eq!(shape.paragraphs[1].font.size, 6.0);
    }

    #[test]
    fn unknown_style_renders_white_box_with_black_text() {
        let (styles, theme, chart) = (styles(), Theme::default(), ChartConfig::default());
        let ctx = DrawContext::new(&styles, &theme, &chart);
        let mut scene = Scene::new(16.54, 11.69);
        let id = draw_box(
            &mut scene,
            &ctx,
            &position(),
            "missing",
            &content(r#"{"line_1": {"text": "x"}}"#),
        )
        .expect("box");
        let shape = scene.shape(id).expect("shape");
        assert_eq!(shape.fill, Some(Rgb::WHITE));
        assert_eq!(shape.paragraphs[0].font.color, Rgb::BLACK);
    }

    #[test]
    fn malformed_content_draws_nothing() {
        let (styles, theme, chart) = (styles(), Theme::default(), ChartConfig::default());
        let ctx = DrawContext::new(&styles, &theme, &chart);
        let mut scene = Scene::new(16.54, 11.69);
        for bad in [r#""plain""#, r#"{"line_1": "not an object"}"#] {
            let err = draw_box(&mut scene, &ctx, &position(), "dept", &content(bad))
                .expect_err("malformed");
            assert!(matches!(err, RenderError::MalformedContent { ref style } if style == "dept"));
        }
        assert!(scene.shapes.is_empty());
    }

    #[test]
    fn composite_box_joins_names() {
        let (styles, theme, chart) = (styles(), Theme::default(), ChartConfig::default());
        let ctx = DrawContext::new(&styles, &theme, &chart);
        let mut scene = Scene::new(16.54, 11.69);
        let composite = CompositeBox {
            position: position(),
            content: CompositeContent {
                title: PlainText {
                    text: "Admin & DDC".to_string(),
                },
                names: vec!["Ahmed".to_string(), "Omar".to_string()],
                additional: Some(PlainText {
                    text: "Document control".to_string(),
                }),
            },
        };
        let id = draw_composite(&mut scene, &ctx, &composite).expect("composite");
        let shape = scene.shape(id).expect("shape");
        assert_eq!(shape.fill, Some(Rgb::WHITE));
        assert!(shape.border.is_some());
        let texts: Vec<&str> = shape.paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["Admin & DDC", "Ahmed, Omar", "Document control"]);
        assert!(shape.paragraphs[0].font.bold);
        assert_eq!(shape.paragraphs[1].font.size, 5.0);
        assert_eq!(shape.frame, TextFrame::composite_box());
        assert_eq!(shape.frame.anchor, VAnchor::Top);
        assert!(shape.frame.word_wrap);
        assert_eq!(shape.frame.margin_left, 0.1);
    }
}
