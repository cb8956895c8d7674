use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma};

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Shrink an image so its width is at most `max_width`, keeping aspect ratio.
///
/// The new height is truncated, so 1600x1200 at 800 becomes 800x600.
/// Images already within the bound are returned unchanged.
pub fn resize_to_max_width(img: &DynamicImage, max_width: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    if width <= max_width || max_width == 0 {
        return img.clone();
    }

    let new_height = ((height as u64 * max_width as u64) / width as u64).max(1) as u32;
    img.resize_exact(max_width, new_height, FilterType::Lanczos3)
}

/// Non-local means parameters
#[derive(Debug, Clone, Copy)]
pub struct NlMeansParams {
    /// Filter strength; larger values smooth more aggressively
    pub h: f32,
    /// Side length of the comparison patch (odd)
    pub template_size: u32,
    /// Side length of the search window (odd)
    pub search_size: u32,
}

/// Grayscale image with replicated borders, stored as i32 for difference math
struct PaddedImage {
    data: Vec<i32>,
    stride: usize,
    pad: usize,
}

impl PaddedImage {
    fn new(img: &GrayImage, pad: usize) -> Self {
        let (w, h) = (img.width() as i64, img.height() as i64);
        let stride = w as usize + 2 * pad;
        let rows = h as usize + 2 * pad;
        let mut data = Vec::with_capacity(stride * rows);

        for py in 0..rows {
            let y = (py as i64 - pad as i64).clamp(0, h - 1) as u32;
            for px in 0..stride {
                let x = (px as i64 - pad as i64).clamp(0, w - 1) as u32;
                data.push(img.get_pixel(x, y)[0] as i32);
            }
        }

        Self { data, stride, pad }
    }

    /// Sample at image coordinates, which may lie up to `pad` outside the image
    #[inline]
    fn at(&self, x: i64, y: i64) -> i32 {
        let px = (x + self.pad as i64) as usize;
        let py = (y + self.pad as i64) as usize;
        self.data[py * self.stride + px]
    }
}

/// Non-local means denoising for single-channel images.
///
/// Every pixel is replaced by the weighted mean of the pixels in its search
/// window, where each candidate's weight is `exp(-d / h^2)` and `d` is the
/// mean squared difference between the two template patches. Patch distances
/// are evaluated one search offset at a time through a summed-area table, so
/// the cost is independent of the template size.
pub fn non_local_means(img: &GrayImage, params: &NlMeansParams) -> GrayImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }

    let t_radius = (params.template_size / 2) as i64;
    let s_radius = (params.search_size / 2) as i64;
    let padded = PaddedImage::new(img, (t_radius + s_radius) as usize);

    let (w, h) = (width as i64, height as i64);
    let template = 2 * t_radius + 1;
    let template_area = (template * template) as f32;
    let h2 = (params.h * params.h).max(f32::EPSILON);

    // Summed-area table over the image extended by the template radius
    let region_w = (w + 2 * t_radius) as usize;
    let region_h = (h + 2 * t_radius) as usize;
    let sat_stride = region_w + 1;
    let mut sat = vec![0u64; sat_stride * (region_h + 1)];

    let pixel_count = (width * height) as usize;
    let mut weighted_sum = vec![0f32; pixel_count];
    let mut weight_total = vec![0f32; pixel_count];

    for dy in -s_radius..=s_radius {
        for dx in -s_radius..=s_radius {
            for ry in 0..region_h {
                let y = ry as i64 - t_radius;
                let mut row_sum = 0u64;
                for rx in 0..region_w {
                    let x = rx as i64 - t_radius;
                    let diff = padded.at(x, y) - padded.at(x + dx, y + dy);
                    row_sum += (diff * diff) as u64;
                    sat[(ry + 1) * sat_stride + rx + 1] = sat[ry * sat_stride + rx + 1] + row_sum;
                }
            }

            for y in 0..h {
                for x in 0..w {
                    let (x0, y0) = (x as usize, y as usize);
                    let (x1, y1) = (x0 + template as usize, y0 + template as usize);
                    let ssd = sat[y1 * sat_stride + x1] + sat[y0 * sat_stride + x0]
                        - sat[y0 * sat_stride + x1]
                        - sat[y1 * sat_stride + x0];

                    let distance = ssd as f32 / template_area;
                    let weight = (-distance / h2).exp();
                    let idx = y0 * width as usize + x0;
                    weighted_sum[idx] += weight * padded.at(x + dx, y + dy) as f32;
                    weight_total[idx] += weight;
                }
            }
        }
    }

    GrayImage::from_fn(width, height, |x, y| {
        let idx = (y * width + x) as usize;
        // The zero offset always contributes weight 1, so the total is never 0
        let value = weighted_sum[idx] / weight_total[idx];
        Luma([value.round().clamp(0.0, 255.0) as u8])
    })
}

/// Edge-preserving bilateral filter.
///
/// `diameter` is the neighborhood size; samples outside the inscribed disc
/// are skipped. Spatial and intensity weights are Gaussian in the pixel
/// distance and the intensity difference respectively.
pub fn bilateral_filter(img: &GrayImage, diameter: u32, sigma_color: f32, sigma_space: f32) -> GrayImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }

    let radius = (diameter / 2).max(1) as i64;
    let padded = PaddedImage::new(img, radius as usize);

    let space_coeff = -0.5 / (sigma_space * sigma_space);
    let color_coeff = -0.5 / (sigma_color * sigma_color);

    let mut spatial = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f32;
            if r2 > (radius * radius) as f32 {
                continue;
            }
            spatial.push((dx, dy, (r2 * space_coeff).exp()));
        }
    }

    let color_lut: Vec<f32> = (0..256)
        .map(|d| ((d * d) as f32 * color_coeff).exp())
        .collect();

    GrayImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let center = padded.at(x, y);
        let mut sum = 0f32;
        let mut norm = 0f32;

        for &(dx, dy, space_weight) in &spatial {
            let value = padded.at(x + dx, y + dy);
            let weight = space_weight * color_lut[(value - center).unsigned_abs() as usize];
            sum += weight * value as f32;
            norm += weight;
        }

        Luma([(sum / norm).round().clamp(0.0, 255.0) as u8])
    })
}
