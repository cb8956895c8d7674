//! Binary morphology with small, possibly even-sized structuring elements.
//!
//! Elements are anchored at `(w/2, h/2)` and applied with imageproc's
//! mask-based grayscale operators, which read `src(p + b)` for every set
//! offset `b` in both dilation and erosion. Samples outside the image are
//! ignored. On 0/255 masks the outputs stay 0/255.

use image::{GrayImage, Luma};
use imageproc::morphology::{grayscale_dilate, grayscale_erode, Mask};

/// Largest side a mask image may have
const MAX_SIDE: u32 = 511;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    shape: GrayImage,
    mask: Mask,
}

impl StructuringElement {
    /// Fully populated `width` x `height` rectangle
    pub fn rect(width: u32, height: u32) -> Self {
        let (width, height) = clamp_size(width, height);
        Self::from_shape(GrayImage::from_pixel(width, height, Luma([255])))
    }

    /// Ellipse inscribed in a `width` x `height` box.
    ///
    /// Rows are filled symmetrically around the center column using the
    /// rounded half-width at each row, which for 2x2 gives `[[0,1],[1,1]]`.
    pub fn ellipse(width: u32, height: u32) -> Self {
        let (width, height) = clamp_size(width, height);
        let r = (height / 2) as i64;
        let c = (width / 2) as i64;
        let inv_r2 = if r > 0 { 1.0 / (r * r) as f64 } else { 0.0 };

        let mut shape = GrayImage::new(width, height);
        for i in 0..height as i64 {
            let dy = i - r;
            if dy.abs() > r {
                continue;
            }
            let dx = (c as f64 * (((r * r - dy * dy) as f64) * inv_r2).sqrt()).round() as i64;
            let j1 = (c - dx).max(0);
            let j2 = (c + dx + 1).min(width as i64);
            for j in j1..j2 {
                shape.put_pixel(j as u32, i as u32, Luma([255]));
            }
        }

        Self::from_shape(shape)
    }

    fn from_shape(shape: GrayImage) -> Self {
        let mask = Mask::from_image(&shape, (shape.width() / 2) as u8, (shape.height() / 2) as u8);
        Self { shape, mask }
    }

    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.shape.get_pixel(x, y)[0] > 0
    }
}

/// An empty element would erode everything into foreground
fn clamp_size(width: u32, height: u32) -> (u32, u32) {
    (width.clamp(1, MAX_SIDE), height.clamp(1, MAX_SIDE))
}

pub fn dilate(src: &GrayImage, element: &StructuringElement, iterations: u32) -> GrayImage {
    let mut out = src.clone();
    for _ in 0..iterations {
        out = grayscale_dilate(&out, &element.mask);
    }
    out
}

pub fn erode(src: &GrayImage, element: &StructuringElement, iterations: u32) -> GrayImage {
    let mut out = src.clone();
    for _ in 0..iterations {
        out = grayscale_erode(&out, &element.mask);
    }
    out
}

/// Dilate `iterations` times, then erode `iterations` times
pub fn close(src: &GrayImage, element: &StructuringElement, iterations: u32) -> GrayImage {
    erode(&dilate(src, element, iterations), element, iterations)
}

/// Erode `iterations` times, then dilate `iterations` times
pub fn open(src: &GrayImage, element: &StructuringElement, iterations: u32) -> GrayImage {
    dilate(&erode(src, element, iterations), element, iterations)
}
