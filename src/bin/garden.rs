use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "garden", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Emit a single flower as an SVG document.
    Flower(FlowerArgs),
    /// Render a garden scene at a point in time as a PNG.
    Frame(FrameArgs),
    /// Print the playground code snippet for a flower configuration.
    Snippet(SnippetArgs),
}

#[derive(Parser, Debug)]
struct FlowerArgs {
    /// Flower kind (daisy, tulip, sunflower, rose, cute, star).
    #[arg(long)]
    kind: String,

    /// Fill color as #RRGGBB; the kind's default when omitted.
    #[arg(long)]
    color: Option<String>,

    /// Size multiplier.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Output SVG path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Garden config JSON; built-in defaults when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Scene time in seconds to render at.
    #[arg(long, default_value_t = 2.0)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the intermediate SVG document here.
    #[arg(long)]
    svg_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SnippetArgs {
    /// Flower kind (daisy, tulip, sunflower, rose, cute, star).
    #[arg(long)]
    kind: String,

    /// Fill color as #RRGGBB.
    #[arg(long, default_value = "#FF69B4")]
    color: String,

    /// Size multiplier.
    #[arg(long, default_value_t = 1.0)]
    size: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Flower(args) => cmd_flower(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Snippet(args) => cmd_snippet(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<bloomgarden::GardenConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: bloomgarden::GardenConfig =
        serde_json::from_reader(r).with_context(|| "parse config JSON")?;
    Ok(config)
}

fn cmd_flower(args: FlowerArgs) -> anyhow::Result<()> {
    let kind: bloomgarden::FlowerKind = args.kind.parse()?;
    let graphic = bloomgarden::generate(kind, args.color.as_deref(), args.scale)?;
    let svg = graphic.to_svg();

    match args.out {
        Some(out) => {
            std::fs::write(&out, svg).with_context(|| format!("write svg '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{svg}"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = match &args.in_path {
        Some(path) => read_config_json(path)?,
        None => bloomgarden::GardenConfig::default(),
    };
    config.validate()?;

    let mut garden = bloomgarden::Garden::new(config)?;
    garden.populate()?;

    // Step the clock the way a host timer loop would so periodic effects
    // fire at their scheduled times.
    let mut t = 0.0;
    while t < args.at {
        t = (t + 0.05).min(args.at);
        garden.advance(t);
    }

    let svg = bloomgarden::render::scene_to_svg(&garden);
    if let Some(svg_out) = &args.svg_out {
        std::fs::write(svg_out, &svg)
            .with_context(|| format!("write svg '{}'", svg_out.display()))?;
        eprintln!("wrote {}", svg_out.display());
    }

    let frame = bloomgarden::render::rasterize_svg(&svg)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.rgba8,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_snippet(args: SnippetArgs) -> anyhow::Result<()> {
    let kind: bloomgarden::FlowerKind = args.kind.parse()?;
    println!(
        "{}",
        bloomgarden::playground::render_snippet(kind, &args.color, args.size)
    );
    Ok(())
}
