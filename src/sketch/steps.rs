use crate::pipeline::{MetadataValue, PipelineContext, PipelineData, PipelineStep};
use crate::sketch::blobs::{self, BlobFilterParams};
use crate::sketch::morphology::{self, StructuringElement};
use crate::sketch::preprocessing::{self, NlMeansParams};
use crate::sketch::edges;
use anyhow::Result;
use image::DynamicImage;

/// Stage 1: grayscale, non-local means, then bilateral smoothing
pub struct DenoiseStep {
    pub nl_means: NlMeansParams,
    pub bilateral_diameter: u32,
    pub bilateral_sigma_color: f32,
    pub bilateral_sigma_space: f32,
}

impl PipelineStep for DenoiseStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = preprocessing::to_grayscale(&data.image);
        let denoised = preprocessing::non_local_means(&gray, &self.nl_means);
        let smooth = preprocessing::bilateral_filter(
            &denoised,
            self.bilateral_diameter,
            self.bilateral_sigma_color,
            self.bilateral_sigma_space,
        );

        tracing::info!(stage = self.name(), "denoised grayscale image");
        Ok(data.with_image(DynamicImage::ImageLuma8(smooth)))
    }

    fn name(&self) -> &str {
        "Denoise"
    }
}

/// Stage 2: Canny and binarized Sobel, merged by pixel-wise maximum.
/// Output keeps edges as foreground (255).
pub struct EdgeDetectionStep {
    pub canny_low: f32,
    pub canny_high: f32,
    pub sobel_threshold: u8,
}

impl PipelineStep for EdgeDetectionStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        let canny = edges::detect_canny(&gray, self.canny_low, self.canny_high);
        let sobel = edges::detect_sobel(&gray, self.sobel_threshold);
        let combined = edges::combine_max(&canny, &sobel);

        let edge_pixels = combined.pixels().filter(|p| p[0] > 0).count();
        tracing::info!(stage = self.name(), edge_pixels, "combined edge maps");

        Ok(data
            .with_image(DynamicImage::ImageLuma8(combined))
            .with_metadata("edge_pixels", MetadataValue::Int(edge_pixels as i64)))
    }

    fn name(&self) -> &str {
        "Edge Detection"
    }
}

/// Stage 3: drop specks, isolated thin lines, threads and sparse clusters
pub struct NoiseFilterStep {
    pub params: BlobFilterParams,
}

impl PipelineStep for NoiseFilterStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let mask = data.image.to_luma8();
        let outcome = blobs::filter_noise_blobs(&mask, &self.params);

        tracing::info!(
            stage = self.name(),
            removed = outcome.removed,
            kept = outcome.kept,
            "filtered noise blobs"
        );

        Ok(data
            .with_image(DynamicImage::ImageLuma8(outcome.mask))
            .with_metadata("blobs_kept", MetadataValue::Int(outcome.kept as i64))
            .with_metadata("blobs_removed", MetadataValue::Int(outcome.removed as i64)))
    }

    fn name(&self) -> &str {
        "Noise Filter"
    }
}

/// Stage 4: close small gaps, then open away the artifacts closing left
pub struct MorphologyStep {
    pub close_size: u32,
    pub close_iterations: u32,
    pub open_size: u32,
    pub open_iterations: u32,
}

impl PipelineStep for MorphologyStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let mask = data.image.to_luma8();
        let closed = morphology::close(
            &mask,
            &StructuringElement::rect(self.close_size, self.close_size),
            self.close_iterations,
        );
        let opened = morphology::open(
            &closed,
            &StructuringElement::ellipse(self.open_size, self.open_size),
            self.open_iterations,
        );

        tracing::info!(stage = self.name(), "enhanced lines");
        Ok(data.with_image(DynamicImage::ImageLuma8(opened)))
    }

    fn name(&self) -> &str {
        "Morphology"
    }
}

/// Stage 5: second labelling pass removing tiny leftovers
pub struct SmallBlobCleanupStep {
    /// Blobs with area at or below this are removed
    pub max_area: u32,
}

impl PipelineStep for SmallBlobCleanupStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let mask = data.image.to_luma8();
        let outcome = blobs::remove_small_blobs(&mask, self.max_area);

        tracing::info!(
            stage = self.name(),
            removed = outcome.removed,
            kept = outcome.kept,
            "removed small artifacts"
        );

        Ok(data
            .with_image(DynamicImage::ImageLuma8(outcome.mask))
            .with_metadata("cleanup_removed", MetadataValue::Int(outcome.removed as i64)))
    }

    fn name(&self) -> &str {
        "Cleanup"
    }
}

/// Stage 6: thicken lines slightly and flip to black ink on white
pub struct PolishStep {
    pub dilate_size: u32,
}

impl PipelineStep for PolishStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let mask = data.image.to_luma8();
        let thick = morphology::dilate(
            &mask,
            &StructuringElement::ellipse(self.dilate_size, self.dilate_size),
            1,
        );
        let sketch = edges::invert(&thick);
        let coverage = crate::ink_coverage(&sketch);

        tracing::info!(stage = self.name(), coverage, "sketch complete");
        Ok(data
            .with_image(DynamicImage::ImageLuma8(sketch))
            .with_metadata("ink_coverage", MetadataValue::Float(coverage)))
    }

    fn name(&self) -> &str {
        "Polish"
    }
}
