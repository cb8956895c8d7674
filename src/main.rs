use anyhow::Context;
use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;

use sketchpath::{process_image, ProcessOptions};

#[derive(Parser)]
#[command(name = "sketchpath")]
#[command(about = "Turn a photo into a clean pencil sketch and smooth vector paths")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Write the vectorized sketch as an SVG file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write width, height, viewBox and paths as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Maximum working width; wider images are scaled down
    #[arg(long, default_value_t = 800)]
    max_width: u32,

    /// Save every stage image to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!(path = %args.image_path.display(), "loading image");
    let img = ImageReader::open(&args.image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    tracing::info!("Image loaded: {}x{}", img.width(), img.height());

    let options = ProcessOptions {
        max_width: args.max_width,
        debug_dir: args.debug_out,
        ..ProcessOptions::default()
    };
    let result = process_image(&img, &options)?;

    println!("Sketch: {}x{} - {}", result.width, result.height, result.method);
    println!("Paths: {}", result.paths.len());

    if let Some(svg_path) = &args.output {
        std::fs::write(svg_path, result.to_svg())
            .with_context(|| format!("failed to write {}", svg_path.display()))?;
        println!("Wrote SVG to {}", svg_path.display());
    }

    if let Some(json_path) = &args.json {
        let file = std::fs::File::create(json_path)
            .with_context(|| format!("failed to create {}", json_path.display()))?;
        serde_json::to_writer_pretty(file, &result).context("failed to serialize sketch")?;
        println!("Wrote JSON to {}", json_path.display());
    }

    Ok(())
}
