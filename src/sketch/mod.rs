pub mod preprocessing;
pub mod edges;
pub mod blobs;
pub mod morphology;
pub mod steps;

use image::{DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::pipeline::Pipeline;
use blobs::BlobFilterParams;
use preprocessing::NlMeansParams;
use steps::*;

/// Every tunable of the six-stage sketch pipeline.
/// `Default` gives the reference behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchParams {
    pub nl_means_h: f32,
    pub nl_means_template_size: u32,
    pub nl_means_search_size: u32,
    pub bilateral_diameter: u32,
    pub bilateral_sigma_color: f32,
    pub bilateral_sigma_space: f32,

    pub canny_low: f32,
    pub canny_high: f32,
    pub sobel_threshold: u8,

    pub blob_filter: BlobFilterParams,

    pub close_size: u32,
    pub close_iterations: u32,
    pub open_size: u32,
    pub open_iterations: u32,

    /// Second pass removes blobs with area <= this
    pub cleanup_max_area: u32,
    pub polish_dilate_size: u32,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            nl_means_h: 8.0,
            nl_means_template_size: 7,
            nl_means_search_size: 21,
            bilateral_diameter: 7,
            bilateral_sigma_color: 60.0,
            bilateral_sigma_space: 60.0,
            canny_low: 15.0,
            canny_high: 50.0,
            sobel_threshold: 35,
            blob_filter: BlobFilterParams::default(),
            close_size: 2,
            close_iterations: 2,
            open_size: 2,
            open_iterations: 1,
            cleanup_max_area: 12,
            polish_dilate_size: 2,
        }
    }
}

/// Build the six-stage sketch pipeline
pub fn build_sketch_pipeline(params: &SketchParams) -> Pipeline {
    Pipeline::new()
        .add_step(Arc::new(DenoiseStep {
            nl_means: NlMeansParams {
                h: params.nl_means_h,
                template_size: params.nl_means_template_size,
                search_size: params.nl_means_search_size,
            },
            bilateral_diameter: params.bilateral_diameter,
            bilateral_sigma_color: params.bilateral_sigma_color,
            bilateral_sigma_space: params.bilateral_sigma_space,
        }))
        .add_step(Arc::new(EdgeDetectionStep {
            canny_low: params.canny_low,
            canny_high: params.canny_high,
            sobel_threshold: params.sobel_threshold,
        }))
        .add_step(Arc::new(NoiseFilterStep {
            params: params.blob_filter,
        }))
        .add_step(Arc::new(MorphologyStep {
            close_size: params.close_size,
            close_iterations: params.close_iterations,
            open_size: params.open_size,
            open_iterations: params.open_iterations,
        }))
        .add_step(Arc::new(SmallBlobCleanupStep {
            max_area: params.cleanup_max_area,
        }))
        .add_step(Arc::new(PolishStep {
            dilate_size: params.polish_dilate_size,
        }))
}

/// Turn a photograph into a binary sketch: 0 = ink, 255 = background.
///
/// The image must be non-empty; callers reject empty input first.
pub fn extract_sketch(img: &DynamicImage, params: &SketchParams) -> anyhow::Result<GrayImage> {
    run_sketch_pipeline(build_sketch_pipeline(params), img)
}

/// Run an already-configured pipeline (e.g. one with debug output enabled)
pub fn run_sketch_pipeline(pipeline: Pipeline, img: &DynamicImage) -> anyhow::Result<GrayImage> {
    let result = pipeline.run(img.clone())?;
    Ok(result.image.to_luma8())
}
