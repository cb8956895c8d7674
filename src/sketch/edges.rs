use image::{GrayImage, Luma};
use imageproc::edges::canny;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

/// Detect edges using Canny edge detector
pub fn detect_canny(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}

/// Sobel gradient magnitude, normalized so the strongest gradient maps to 255,
/// then binarized: pixels strictly above `threshold` become 255.
///
/// A flat image has no gradient at all and yields an empty mask.
pub fn detect_sobel(img: &GrayImage, threshold: u8) -> GrayImage {
    let gx = horizontal_sobel(img);
    let gy = vertical_sobel(img);

    let magnitude: Vec<f32> = gx
        .pixels()
        .zip(gy.pixels())
        .map(|(x, y)| {
            let (x, y) = (x[0] as f32, y[0] as f32);
            (x * x + y * y).sqrt()
        })
        .collect();

    let max = magnitude.iter().copied().fold(0f32, f32::max);
    let (width, height) = img.dimensions();
    if max <= 0.0 {
        return GrayImage::new(width, height);
    }

    GrayImage::from_fn(width, height, |x, y| {
        let m = magnitude[(y * width + x) as usize];
        let normalized = (m / max * 255.0) as u8;
        Luma([if normalized > threshold { 255 } else { 0 }])
    })
}

/// Pixel-wise maximum of two masks of equal size
pub fn combine_max(a: &GrayImage, b: &GrayImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y)[0].max(b.get_pixel(x, y)[0])])
    })
}

/// Swap foreground and background (255 - v)
pub fn invert(mask: &GrayImage) -> GrayImage {
    let mut out = mask.clone();
    image::imageops::invert(&mut out);
    out
}
