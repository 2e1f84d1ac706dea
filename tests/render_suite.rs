use std::path::{Path, PathBuf};

use orgchart_renderer::canvas::LineSegment;
use orgchart_renderer::style::Rgb;
use orgchart_renderer::{
    Config, Document, OutputFormat, RenderError, Scene, Units, render_chart, render_svg,
    render_to_path,
};

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).expect("fixture read failed")
}

fn config() -> Config {
    let mut config = Config::default();
    config.render.fast_text_metrics = true;
    config
}

fn render_fixture(name: &str) -> Scene {
    let document = Document::from_json(&fixture(name)).expect("fixture parse failed");
    render_chart(&document, &config()).expect("render failed")
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("orgchart-suite-{}-{}", tag, std::process::id()));
    std::fs::create_dir_all(&dir).expect("scratch dir");
    dir
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn horizontal(lines: &[LineSegment]) -> Vec<&LineSegment> {
    lines
        .iter()
        .filter(|line| close(line.from.y, line.to.y) && !close(line.from.x, line.to.x))
        .collect()
}

#[test]
fn top_box_and_two_departments() {
    let scene = render_fixture("minimal.json");
    let units = Units::default();

    assert_eq!(scene.outlined_shapes().count(), 3);
    assert_eq!(scene.lines.len(), 4);

    let drop = scene.lines[0];
    assert!(close(drop.from.x, units.to_x(600.0)));
    assert!(close(drop.from.y, units.to_y(60.0)));
    assert!(close(drop.to.y, units.to_y(90.0)));

    let bus = horizontal(&scene.lines);
    assert_eq!(bus.len(), 1);
    assert!(close(bus[0].from.x, units.to_x(280.0)));
    assert!(close(bus[0].to.x, units.to_x(880.0)));
}

#[test]
fn removing_a_department_keeps_the_drop_height() {
    let mut value: serde_json::Value = serde_json::from_str(&fixture("minimal.json")).expect("json");
    value["organizational_structure"]["level_2_departments"]
        .as_array_mut()
        .expect("departments")
        .pop();
    let document: Document = serde_json::from_value(value).expect("document");
    let scene = render_chart(&document, &config()).expect("render");
    let full = render_fixture("minimal.json");

    assert_eq!(scene.outlined_shapes().count(), 2);
    // drop + dog-leg of two segments
    assert_eq!(scene.lines.len(), 3);
    assert_eq!(scene.lines[0], full.lines[0]);

    let units = Units::default();
    let leg = horizontal(&scene.lines);
    assert_eq!(leg.len(), 1);
    assert!(close(leg[0].from.x, units.to_x(600.0)));
    assert!(close(leg[0].to.x, units.to_x(280.0)));
}

#[test]
fn keyed_lines_follow_their_numbers() {
    let scene = render_fixture("minimal.json");
    let top = scene.outlined_shapes().next().expect("top box");
    let texts: Vec<&str> = top.paragraphs.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, ["A. Example", "Chief Executive Officer"]);
    assert_eq!(top.fill, Some(Rgb(0x1F, 0x38, 0x64)));
    assert!(top.paragraphs[0].font.bold);
    assert_eq!(top.paragraphs[1].font.size, 6.0);
    assert_eq!(top.paragraphs[0].font.color, Rgb::WHITE);
}

#[test]
fn full_chart_draws_every_slot() {
    let scene = render_fixture("full.json");

    // title block (2) + footer (1) are the only borderless shapes
    assert_eq!(scene.shapes.len(), 23);
    assert_eq!(scene.outlined_shapes().count(), 20);
    // tiers 5 + 4, division staff 4, zone staff 4, manager to zones 4
    assert_eq!(scene.lines.len(), 21);

    let supervisor = scene
        .shapes
        .iter()
        .find(|shape| shape.paragraphs.first().is_some_and(|p| p.text == "Supervisor"))
        .expect("supervisor box");
    assert_eq!(supervisor.fill, Some(Rgb::WHITE));
    assert_eq!(supervisor.paragraphs[0].font.color, Rgb::BLACK);

    let composite = scene
        .shapes
        .iter()
        .find(|shape| shape.paragraphs.first().is_some_and(|p| p.text == "Administration"))
        .expect("composite box");
    let texts: Vec<&str> = composite.paragraphs.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, ["Administration", "C. Example, D. Example", "Reports to HR"]);

    let svg = render_svg(&scene, &config().render);
    assert!(svg.contains("MAIN PROJECTS"));
    assert!(svg.contains("Positions under recruitment"));
    assert_eq!(svg.matches("<line ").count(), 21);
}

#[test]
fn tier_connections_are_drawn_last() {
    let scene = render_fixture("full.json");
    let units = Units::default();
    // staff row hangs off projects_management (x 525..675, bottom 120)
    let tail = &scene.lines[scene.lines.len() - 4..];
    assert!(close(tail[0].from.x, units.to_x(600.0)));
    assert!(close(tail[0].from.y, units.to_y(120.0)));
}

#[test]
fn malformed_content_leaves_no_output() {
    let dir = scratch_dir("malformed");
    let output = dir.join("chart.svg");
    let document = Document::from_json(&fixture("malformed.json")).expect("parse");

    let err = render_to_path(&document, &config(), &output, OutputFormat::Svg)
        .expect_err("malformed content must abort");
    assert!(matches!(err, RenderError::MalformedContent { ref style } if style == "department"));
    assert!(!output.exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn render_to_path_writes_svg() {
    let dir = scratch_dir("svg");
    let output = dir.join("chart.svg");
    let document = Document::from_json(&fixture("minimal.json")).expect("parse");

    let scene = render_to_path(&document, &config(), &output, OutputFormat::Svg).expect("render");
    let written = std::fs::read_to_string(&output).expect("output written");
    assert!(written.starts_with("<svg"));
    assert!(written.contains("Projects Management"));
    assert_eq!(written.matches("<line ").count(), scene.lines.len());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unknown_keys_are_ignored() {
    let document = Document::from_json(
        r#"{"metadata": {"author": "x"}, "organizational_structure": {"notes": []}}"#,
    )
    .expect("parse");
    let scene = render_chart(&document, &config()).expect("render");
    assert_eq!(scene.outlined_shapes().count(), 0);
}

#[test]
fn broken_box_inside_a_zone_is_a_document_error() {
    let json = r#"{"organizational_structure": {"main_project_divisions": {"divisions": [{
        "project_manager": {"position": {"x": 500, "y": 300, "width": 100, "height": 30},
                            "style": "pm", "content": []},
        "zones": [{
            "zone_manager": {"position": {"x": 300, "y": 400, "width": 100, "height": 30},
                             "style": "zm", "content": []},
            "staff": [{"position": {"x": 250, "y": 480, "width": 100, "height": 30}, "content": []}]
        }]
    }]}}}"#;
    let err = Document::from_json(json).expect_err("staff box without style");
    assert!(matches!(err, RenderError::Document(_)));
}
