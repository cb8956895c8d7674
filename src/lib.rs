pub mod error;
pub mod models;
pub mod pipeline;
pub mod sketch;
pub mod vectorize;

pub use error::SketchError;
pub use models::{Blob, SketchOutput};
pub use pipeline::{Pipeline, PipelineContext, PipelineData, PipelineStep, MetadataValue, DebugConfig};
pub use sketch::{extract_sketch, SketchParams};
pub use vectorize::{vectorize, CurvePath, PathCommand, VectorizeParams};

use image::{DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for a full photo-to-paths run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOptions {
    /// Wider images are scaled down to this width before processing
    pub max_width: u32,
    pub sketch: SketchParams,
    pub vectorize: VectorizeParams,
    /// Write every intermediate stage image here (must be empty or absent)
    #[serde(skip)]
    pub debug_dir: Option<PathBuf>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            max_width: 800,
            sketch: SketchParams::default(),
            vectorize: VectorizeParams::default(),
            debug_dir: None,
        }
    }
}

/// Percentage of pixels that are ink (value 0) in a sketch
pub fn ink_coverage(sketch: &GrayImage) -> f32 {
    let total = sketch.width() as u64 * sketch.height() as u64;
    if total == 0 {
        return 0.0;
    }
    let ink = sketch.pixels().filter(|p| p[0] == 0).count() as u64;
    (ink as f64 / total as f64 * 100.0) as f32
}

/// Resize, sketch and vectorize a decoded image
pub fn process_image(img: &DynamicImage, options: &ProcessOptions) -> Result<SketchOutput, SketchError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(SketchError::InvalidInput("image has no pixels".to_string()));
    }

    let working = sketch::preprocessing::resize_to_max_width(img, options.max_width);
    let (width, height) = (working.width(), working.height());
    if (width, height) != (img.width(), img.height()) {
        tracing::info!(width, height, "resized input");
    }

    let mut pipeline = sketch::build_sketch_pipeline(&options.sketch);
    if let Some(dir) = &options.debug_dir {
        pipeline = pipeline.with_debug(dir.clone())?;
    }
    let sketch = sketch::run_sketch_pipeline(pipeline, &working)?;

    let coverage = ink_coverage(&sketch);
    let paths: Vec<String> = vectorize(&sketch, &options.vectorize)
        .iter()
        .map(|p| p.to_string())
        .collect();

    tracing::info!(coverage = %format!("{:.1}%", coverage), paths = paths.len(), "processing complete");
    Ok(SketchOutput::new(width, height, paths, coverage))
}

/// Decode an encoded image (PNG, JPEG, ...) and process it
pub fn process_bytes(bytes: &[u8], options: &ProcessOptions) -> Result<SketchOutput, SketchError> {
    if bytes.is_empty() {
        return Err(SketchError::InvalidInput("no image data provided".to_string()));
    }
    let img = image::load_from_memory(bytes)?;
    process_image(&img, options)
}
