use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use checkerboard::{
    CheckerboardRenderer, FontFileMetrics, RenderConfig, positive_integer, preview_size,
};

#[derive(Parser)]
#[command(name = "checkerboard")]
#[command(about = "Generate a fancy checkerboard")]
struct Cli {
    /// Main-grid divisions
    #[arg(long, default_value = "10", value_parser = positive_integer)]
    divisions: u32,

    /// Sub-grid divisions
    #[arg(long, default_value = "10", value_parser = positive_integer)]
    subdivisions: u32,

    /// Destination output
    #[arg(value_name = "OUTPUT_SVG_FILENAME")]
    output_svg_filename: PathBuf,

    /// Measure labels with this TrueType/OpenType font
    #[arg(long, value_name = "FONT")]
    font: Option<PathBuf>,

    /// Also write a PNG preview
    #[arg(long, value_name = "PNG")]
    preview: Option<PathBuf>,

    /// Preview edge length in pixels
    #[arg(long, default_value = "1024", value_parser = preview_size)]
    preview_size: u32,

    /// Save a snapshot after each layer to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = RenderConfig::new(args.divisions, args.subdivisions)?;
    let mut renderer = CheckerboardRenderer::new(config);

    if let Some(font_path) = &args.font {
        let font = FontFileMetrics::load(font_path)?;
        log::debug!("Loaded font {}", font_path.display());
        renderer = renderer.with_font(font);
    }

    if let Some(debug_dir) = args.debug_out {
        renderer = renderer.with_debug(debug_dir, args.preview_size);
    }

    let canvas = renderer
        .write_svg(&args.output_svg_filename)
        .with_context(|| format!("Failed to generate {}", args.output_svg_filename.display()))?;

    if let Some(preview) = &args.preview {
        renderer.write_preview(&canvas, preview, args.preview_size)?;
    }

    Ok(())
}
