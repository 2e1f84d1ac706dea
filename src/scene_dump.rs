use crate::canvas::Scene;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct SceneDump {
    pub width: f32,
    pub height: f32,
    pub background: String,
    pub shapes: Vec<ShapeDump>,
    pub lines: Vec<LineDump>,
}

#[derive(Debug, Serialize)]
pub struct ShapeDump {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<String>,
    pub border: Option<String>,
    pub paragraphs: Vec<ParagraphDump>,
}

#[derive(Debug, Serialize)]
pub struct ParagraphDump {
    pub text: String,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: String,
    pub align: String,
}

#[derive(Debug, Serialize)]
pub struct LineDump {
    pub from: [f32; 2],
    pub to: [f32; 2],
}

impl SceneDump {
    pub fn from_scene(scene: &Scene) -> Self {
        let shapes = scene
            .shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| ShapeDump {
                index,
                x: shape.rect.x,
                y: shape.rect.y,
                width: shape.rect.width,
                height: shape.rect.height,
                fill: shape.fill.map(|color| color.to_string()),
                border: shape.border.map(|stroke| stroke.color.to_string()),
                paragraphs: shape
                    .paragraphs
                    .iter()
                    .map(|paragraph| ParagraphDump {
                        text: paragraph.text.clone(),
                        font_size: paragraph.font.size,
                        bold: paragraph.font.bold,
                        italic: paragraph.font.italic,
                        color: paragraph.font.color.to_string(),
                        align: format!("{:?}", paragraph.align),
                    })
                    .collect(),
            })
            .collect();

        let lines = scene
            .lines
            .iter()
            .map(|line| LineDump {
                from: [line.from.x, line.from.y],
                to: [line.to.x, line.to.y],
            })
            .collect();

        SceneDump {
            width: scene.width,
            height: scene.height,
            background: scene.background.to_string(),
            shapes,
            lines,
        }
    }
}

/// Writes the drawn shapes and connector segments, in inches, as JSON.
pub fn write_scene_dump(path: &Path, scene: &Scene) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = SceneDump::from_scene(scene);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
