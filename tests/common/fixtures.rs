use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// White RGB canvas
pub fn white_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
}

/// Paint a solid black disc
pub fn draw_disc(img: &mut RgbImage, cx: i32, cy: i32, radius: i32) {
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = x as i32 - cx;
        let dy = y as i32 - cy;
        if dx * dx + dy * dy <= radius * radius {
            *pixel = Rgb([0, 0, 0]);
        }
    }
}

/// Paint a one-pixel black diagonal running down-right from (x, y)
pub fn draw_diagonal(img: &mut RgbImage, x: u32, y: u32, length: u32) {
    for i in 0..length {
        img.put_pixel(x + i, y + i, Rgb([0, 0, 0]));
    }
}

/// 200x200 white photo with a radius-30 disc in the middle
pub fn disc_photo() -> DynamicImage {
    let mut img = white_image(200, 200);
    draw_disc(&mut img, 100, 100, 30);
    DynamicImage::ImageRgb8(img)
}

/// Start points of the diagonals drawn by [`disc_with_noise_lines`]
pub const NOISE_LINE_STARTS: [(u32, u32); 5] = [(5, 5), (150, 5), (5, 150), (150, 150), (80, 155)];

/// 200x200 white photo with a radius-30 disc in the middle and five
/// isolated 40px one-pixel diagonals around the edges
pub fn disc_with_noise_lines() -> DynamicImage {
    let mut img = white_image(200, 200);
    draw_disc(&mut img, 100, 100, 30);
    for &(x, y) in &NOISE_LINE_STARTS {
        draw_diagonal(&mut img, x, y, 40);
    }
    DynamicImage::ImageRgb8(img)
}

/// Sketch-polarity canvas (255 = background)
pub fn blank_sketch(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([255]))
}

/// Ink a filled rectangle into a sketch (0 = ink)
pub fn ink_rect(sketch: &mut GrayImage, x: u32, y: u32, width: u32, height: u32) {
    for yy in y..y + height {
        for xx in x..x + width {
            sketch.put_pixel(xx, yy, Luma([0]));
        }
    }
}

/// Foreground-polarity mask (255 = foreground) with a filled rectangle
pub fn mask_rect(mask: &mut GrayImage, x: u32, y: u32, width: u32, height: u32) {
    for yy in y..y + height {
        for xx in x..x + width {
            mask.put_pixel(xx, yy, Luma([255]));
        }
    }
}

/// All points a path visits (move, line and curve end points, controls)
pub fn path_points(path: &sketchpath::CurvePath) -> Vec<(i32, i32)> {
    path.commands()
        .iter()
        .flat_map(|c| match *c {
            sketchpath::PathCommand::MoveTo(p) | sketchpath::PathCommand::LineTo(p) => vec![(p.x, p.y)],
            sketchpath::PathCommand::QuadTo { control, to } => {
                vec![(control.x, control.y), (to.x, to.y)]
            }
        })
        .collect()
}
