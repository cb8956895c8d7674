use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::geometry::arc_length;
use imageproc::point::Point;

/// One traced boundary of an ink region
#[derive(Debug, Clone)]
pub struct TracedContour {
    /// Every boundary pixel in tracing order
    pub boundary: Vec<Point<i32>>,
    /// Corner points of the boundary chain
    pub dominant: Vec<Point<i32>>,
}

impl TracedContour {
    pub fn from_boundary(boundary: Vec<Point<i32>>) -> Self {
        let dominant = dominant_points(&boundary);
        Self { boundary, dominant }
    }

    /// Open polyline length of the dominant points
    pub fn arc_length(&self) -> f64 {
        arc_length(&self.dominant, false)
    }
}

/// Trace the borders of every ink region of a sketch (0 = ink).
///
/// Outer borders and holes are both returned, in discovery order, with no
/// hierarchy attached.
pub fn trace_ink_contours(sketch: &GrayImage) -> Vec<TracedContour> {
    let mut ink = sketch.clone();
    image::imageops::invert(&mut ink);

    find_contours::<i32>(&ink)
        .into_iter()
        .map(|c| TracedContour::from_boundary(c.points))
        .collect()
}

/// Reduce a closed boundary chain to the points where its direction changes.
///
/// Runs of collinear steps collapse to their end points, so a one-pixel
/// straight line traced out and back becomes just its two end pixels.
pub fn dominant_points(boundary: &[Point<i32>]) -> Vec<Point<i32>> {
    let mut chain: Vec<Point<i32>> = Vec::with_capacity(boundary.len());
    for &p in boundary {
        if chain.last() != Some(&p) {
            chain.push(p);
        }
    }
    while chain.len() > 1 && chain.first() == chain.last() {
        chain.pop();
    }

    let n = chain.len();
    if n < 3 {
        return chain;
    }

    let step = |a: Point<i32>, b: Point<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());

    (0..n)
        .filter(|&i| {
            let prev = chain[(i + n - 1) % n];
            let next = chain[(i + 1) % n];
            step(prev, chain[i]) != step(chain[i], next)
        })
        .map(|i| chain[i])
        .collect()
}
