//! Drawing of chart elements onto a [`Canvas`].
//!
//! Everything here works in source pixels and converts through [`Units`]
//! at the point a primitive is handed to the canvas.

mod boxes;
mod connector;
mod tree;

pub use boxes::*;
pub use connector::*;
pub use tree::*;

use crate::canvas::{Font, Point, Rect, Stroke};
use crate::config::ChartConfig;
use crate::ir::Position;
use crate::style::{Rgb, StyleTable};
use crate::theme::Theme;
use crate::units::Units;

/// What every draw call needs besides the canvas itself.
#[derive(Debug, Clone)]
pub struct DrawContext<'a> {
    pub units: Units,
    pub styles: &'a StyleTable,
    pub theme: &'a Theme,
    pub chart: &'a ChartConfig,
    border: Stroke,
    connector: Stroke,
}

impl<'a> DrawContext<'a> {
    pub fn new(styles: &'a StyleTable, theme: &'a Theme, chart: &'a ChartConfig) -> Self {
        Self {
            units: Units::for_preset(chart.preset),
            styles,
            theme,
            chart,
            border: Stroke {
                color: Rgb::from_hex_or(&theme.border_color, Rgb::BLACK),
                width: theme.border_width,
            },
            connector: Stroke {
                color: Rgb::from_hex_or(&theme.connector_color, Rgb::BLACK),
                width: theme.connector_width,
            },
        }
    }

    pub fn rect(&self, position: &Position) -> Rect {
        Rect {
            x: self.units.to_x(position.x),
            y: self.units.to_y(position.y),
            width: self.units.to_x(position.width),
            height: self.units.to_y(position.height),
        }
    }

    pub fn point(&self, (x, y): (f32, f32)) -> Point {
        Point::new(self.units.to_x(x), self.units.to_y(y))
    }

    pub fn border(&self) -> Stroke {
        self.border
    }

    pub fn connector_stroke(&self) -> Stroke {
        self.connector
    }

    pub fn font(&self, size: f32, bold: bool, italic: bool, color: Rgb) -> Font {
        Font {
            family: self.theme.font_family.clone(),
            size,
            bold,
            italic,
            color,
        }
    }
}
