//! The drawing surface the chart is rendered onto.
//!
//! Drawing code only talks to the [`Canvas`] trait. [`Scene`] is the
//! in-memory implementation: an append-only list of rectangles and line
//! segments in page inches, serialized later by `render`.

use crate::error::RenderError;
use crate::style::Rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    /// Width in points.
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HAlign {
    pub fn from_token(token: &str) -> Self {
        match token {
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAnchor {
    #[default]
    Top,
    Middle,
}

/// Text layout settings of a shape. Margins are in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFrame {
    pub word_wrap: bool,
    pub anchor: VAnchor,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl TextFrame {
    /// Tight frame used inside chart boxes: 1pt sides, 0.5pt top and bottom.
    pub fn chart_box() -> Self {
        Self {
            word_wrap: true,
            anchor: VAnchor::Middle,
            margin_left: pt_to_in(1.0),
            margin_right: pt_to_in(1.0),
            margin_top: pt_to_in(0.5),
            margin_bottom: pt_to_in(0.5),
        }
    }

    /// Outlined box with wrapped, top-anchored text and the default insets.
    pub fn composite_box() -> Self {
        Self {
            word_wrap: true,
            ..Self::text_box()
        }
    }

    /// Free-standing text with the usual 0.1" / 0.05" insets.
    pub fn text_box() -> Self {
        Self {
            word_wrap: false,
            anchor: VAnchor::Top,
            margin_left: 0.1,
            margin_right: 0.1,
            margin_top: 0.05,
            margin_bottom: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    /// Size in points.
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub font: Font,
    pub align: HAlign,
    pub line_spacing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(usize);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

/// Append-only drawing operations. Coordinates are page inches.
pub trait Canvas {
    fn add_rectangle(
        &mut self,
        rect: Rect,
        fill: Option<Rgb>,
        border: Option<Stroke>,
        frame: TextFrame,
    ) -> ShapeId;

    fn add_text_paragraph(&mut self, shape: ShapeId, paragraph: Paragraph)
    -> Result<(), RenderError>;

    fn add_line_segment(&mut self, from: Point, to: Point, stroke: Stroke);
}

#[derive(Debug, Clone)]
pub struct Shape {
    pub rect: Rect,
    pub fill: Option<Rgb>,
    pub border: Option<Stroke>,
    pub frame: TextFrame,
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
    pub stroke: Stroke,
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Rgb,
    pub shapes: Vec<Shape>,
    pub lines: Vec<LineSegment>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: Rgb::WHITE,
            shapes: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    /// Shapes that have an outline, i.e. chart boxes rather than loose text.
    pub fn outlined_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|shape| shape.border.is_some())
    }
}

impl Canvas for Scene {
    fn add_rectangle(
        &mut self,
        rect: Rect,
        fill: Option<Rgb>,
        border: Option<Stroke>,
        frame: TextFrame,
    ) -> ShapeId {
        self.shapes.push(Shape {
            rect,
            fill,
            border,
            frame,
            paragraphs: Vec::new(),
        });
        ShapeId(self.shapes.len() - 1)
    }

    fn add_text_paragraph(
        &mut self,
        shape: ShapeId,
        paragraph: Paragraph,
    ) -> Result<(), RenderError> {
        let target = self
            .shapes
            .get_mut(shape.0)
            .ok_or(RenderError::UnknownShape(shape))?;
        target.paragraphs.push(paragraph);
        Ok(())
    }

    fn add_line_segment(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.lines.push(LineSegment { from, to, stroke });
    }
}

pub fn pt_to_in(points: f32) -> f32 {
    points / 72.0
}
