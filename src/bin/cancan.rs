//! cancan CLI: run, measure or rewrite a pattern.
//!
//! Output goes to stdout (JSON or SVG); logs go to stderr, filtered by `RUST_LOG`.

use std::{fmt::Write as _, fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use cancan::{
    Coord, Instruction, PatternConfig, PatternInterpreter, Recorder, Start, Transform, apply_all,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cancan", version, about = "Line-art pattern interpreter")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interpret a pattern and print the resulting surface instructions.
    Draw(DrawArgs),
    /// Print the bounding box of a pattern's cursor travel as JSON.
    Measure(RunArgs),
    /// Rewrite a pattern with mirror/rotate transforms and print it.
    Transform(TransformArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Pattern text.
    #[arg(allow_hyphen_values = true)]
    pattern: String,

    /// Start X. Centered on the canvas when omitted.
    #[arg(long, allow_hyphen_values = true)]
    x: Option<f32>,

    /// Start Y. Centered on the canvas when omitted.
    #[arg(long, allow_hyphen_values = true)]
    y: Option<f32>,

    /// JSON file with a `PatternConfig`; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Step size on both axes.
    #[arg(long)]
    step: Option<f32>,

    #[arg(long)]
    canvas_width: Option<f32>,

    #[arg(long)]
    canvas_height: Option<f32>,

    /// Stroke color, passed through to the surface.
    #[arg(long)]
    color: Option<String>,

    /// Stroke width.
    #[arg(long)]
    width: Option<f32>,

    /// Transforms applied to the pattern before interpretation, in order.
    #[arg(long = "transform", value_enum)]
    transforms: Vec<Transform>,
}

#[derive(Args, Debug)]
struct DrawArgs {
    #[command(flatten)]
    run: RunArgs,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Args, Debug)]
struct TransformArgs {
    #[arg(allow_hyphen_values = true)]
    pattern: String,

    #[arg(long = "transform", value_enum, required = true)]
    transforms: Vec<Transform>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Svg,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Draw(args) => cmd_draw(args),
        Command::Measure(args) => cmd_measure(args),
        Command::Transform(args) => {
            println!("{}", apply_all(&args.transforms, &args.pattern));
            Ok(())
        }
    }
}

fn load_config(args: &RunArgs) -> anyhow::Result<PatternConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open config '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("parse config '{}'", path.display()))?
        }
        None => PatternConfig::default(),
    };

    if let Some(step) = args.step {
        config.step = Vec2::splat(step);
    }
    if let Some(w) = args.canvas_width {
        config.canvas.x = w;
    }
    if let Some(h) = args.canvas_height {
        config.canvas.y = h;
    }
    if let Some(color) = &args.color {
        config.stroke_color = color.clone();
    }
    if let Some(width) = args.width {
        config.stroke_width = width;
    }
    Ok(config)
}

fn start_of(args: &RunArgs) -> Start {
    let coord = |v: Option<f32>| v.map_or(Coord::Centered, Coord::At);
    Start {
        x: coord(args.x),
        y: coord(args.y),
    }
}

fn cmd_draw(args: DrawArgs) -> anyhow::Result<()> {
    let config = load_config(&args.run)?;
    let pattern = apply_all(&args.run.transforms, &args.run.pattern);
    let interpreter = PatternInterpreter::new(config);

    let mut recorder = Recorder::new();
    interpreter
        .draw(&mut recorder, start_of(&args.run), &pattern)
        .with_context(|| format!("draw pattern '{pattern}'"))?;

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&recorder.instructions)?),
        Format::Svg => println!("{}", to_svg(interpreter.config(), &recorder)),
    }
    Ok(())
}

fn cmd_measure(args: RunArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let pattern = apply_all(&args.transforms, &args.pattern);
    let interpreter = PatternInterpreter::new(config);

    let mut recorder = Recorder::new();
    let bounds = interpreter
        .measure(&mut recorder, start_of(&args), &pattern)
        .with_context(|| format!("measure pattern '{pattern}'"))?;

    println!("{}", serde_json::to_string_pretty(&bounds)?);
    Ok(())
}

/// One `<path>` holding every pen motion the recorder saw.
fn to_svg(config: &PatternConfig, recorder: &Recorder) -> String {
    let mut d = String::new();
    for ins in recorder.path() {
        let (cmd, p) = match ins {
            Instruction::MoveTo { point } => ('M', point),
            Instruction::LineTo { point } => ('L', point),
            _ => continue,
        };
        if !d.is_empty() {
            d.push(' ');
        }
        let _ = write!(d, "{cmd}{} {}", p.x, p.y);
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><path d="{d}" fill="none" stroke="{color}" stroke-width="{sw}"/></svg>"#,
        w = config.canvas.x,
        h = config.canvas.y,
        color = config.stroke_color,
        sw = config.stroke_width,
    )
}
