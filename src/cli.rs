use crate::chart::{render_chart, render_to_path};
use crate::config::load_config;
use crate::ir::Document;
use crate::render::{OutputFormat, render_svg, write_output_svg};
use crate::scene_dump::write_scene_dump;
use crate::units::PagePreset;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "orgc", version, about = "Renders org-chart JSON documents to SVG or PNG")]
pub struct Args {
    /// Input chart document (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format. Guessed from the output extension when omitted.
    #[arg(short = 'e', long = "outputFormat", value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Config JSON file (theme, page preset, title block)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Page preset: a3 or compact
    #[arg(short = 'p', long = "preset", value_parser = parse_preset)]
    pub preset: Option<PagePreset>,

    /// Write the drawn scene as JSON to this path
    #[arg(long = "dumpScene")]
    pub dump_scene: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(preset) = args.preset {
        config.chart.preset = preset;
    }

    let input = read_input(args.input.as_deref())?;
    let document = Document::from_json(&input)?;
    let format = resolve_format(args.output_format, args.output.as_deref());

    let scene = match (format, args.output.as_deref()) {
        (OutputFormat::Svg, None) => {
            let scene = render_chart(&document, &config)?;
            write_output_svg(&render_svg(&scene, &config.render), None)?;
            scene
        }
        (format, output) => {
            let output = ensure_output(output, format.extension())?;
            render_to_path(&document, &config, &output, format)?
        }
    };

    if let Some(path) = args.dump_scene.as_deref() {
        write_scene_dump(path, &scene)?;
    }
    Ok(())
}

fn init_logging() {
    // stdout may carry the SVG
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn parse_preset(token: &str) -> Result<PagePreset, String> {
    PagePreset::from_token(token).ok_or_else(|| format!("unknown preset `{token}` (expected a3 or compact)"))
}

fn resolve_format(explicit: Option<OutputFormat>, output: Option<&Path>) -> OutputFormat {
    explicit
        .or_else(|| output.and_then(OutputFormat::from_path))
        .unwrap_or(OutputFormat::Svg)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn ensure_output(output: Option<&Path>, ext: &str) -> Result<PathBuf> {
    output
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow::anyhow!("Output path required for {} output", ext))
}
