pub mod contours;
pub mod path;

use image::GrayImage;
use imageproc::geometry::approximate_polygon_dp;
use serde::{Deserialize, Serialize};
use contours::TracedContour;
pub use path::{CurvePath, PathCommand};

/// Thresholds for turning traced contours into curves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizeParams {
    /// Boundaries with fewer traced pixels are dropped
    pub min_traced_points: usize,
    /// Contours shorter than this (open arc length) are dropped
    pub min_arc_length: f64,
    /// `(length above which, epsilon factor)` tiers, longest first
    pub epsilon_tiers: Vec<(f64, f64)>,
    /// Factor for contours that fall under every tier
    pub epsilon_fallback: f64,
}

impl Default for VectorizeParams {
    fn default() -> Self {
        Self {
            min_traced_points: 4,
            min_arc_length: 10.0,
            epsilon_tiers: vec![(200.0, 0.001), (100.0, 0.002), (50.0, 0.003)],
            epsilon_fallback: 0.005,
        }
    }
}

impl VectorizeParams {
    /// Simplification tolerance for a contour of the given arc length.
    /// Long contours get a proportionally tighter tolerance to keep detail.
    pub fn epsilon(&self, arc_length: f64) -> f64 {
        let factor = self
            .epsilon_tiers
            .iter()
            .find(|(threshold, _)| arc_length > *threshold)
            .map(|&(_, factor)| factor)
            .unwrap_or(self.epsilon_fallback);
        factor * arc_length
    }
}

/// Convert one traced contour to a curve path, or `None` if it is too small
/// or simplifies away to a single point
pub fn vectorize_contour(contour: &TracedContour, params: &VectorizeParams) -> Option<CurvePath> {
    if contour.boundary.len() < params.min_traced_points {
        return None;
    }

    let length = contour.arc_length();
    if length < params.min_arc_length {
        return None;
    }

    // approximate_polygon_dp rejects a zero tolerance
    let epsilon = params.epsilon(length);
    let simplified = if epsilon > 0.0 {
        approximate_polygon_dp(&contour.dominant, epsilon, false)
    } else {
        contour.dominant.clone()
    };
    if simplified.len() < 2 {
        return None;
    }

    CurvePath::from_points(&simplified)
}

/// Turn a binary sketch (0 = ink) into curve paths, in contour discovery order
pub fn vectorize(sketch: &GrayImage, params: &VectorizeParams) -> Vec<CurvePath> {
    let traced = contours::trace_ink_contours(sketch);

    let paths: Vec<CurvePath> = traced
        .iter()
        .filter_map(|contour| vectorize_contour(contour, params))
        .collect();

    let total_points: usize = paths.iter().map(|p| p.commands().len()).sum();
    tracing::info!(
        contours = traced.len(),
        paths = paths.len(),
        commands = total_points,
        "vectorized sketch"
    );

    paths
}
