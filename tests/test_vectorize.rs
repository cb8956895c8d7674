mod common;

use common::*;
use image::Luma;
use imageproc::point::Point;
use sketchpath::vectorize::contours::TracedContour;
use sketchpath::vectorize::vectorize_contour;

#[test]
fn blank_sketch_has_no_paths() {
    let sketch = blank_sketch(64, 64);
    assert!(vectorize(&sketch, &VectorizeParams::default()).is_empty());
}

#[test]
fn straight_diagonal_becomes_one_line() {
    let mut sketch = blank_sketch(100, 100);
    for i in 10..=70 {
        sketch.put_pixel(i, i, Luma([0]));
    }

    let paths = vectorize(&sketch, &VectorizeParams::default());
    assert_eq!(paths.len(), 1);

    let path = &paths[0];
    assert!(!path.has_curves());
    assert!(matches!(path.commands(), [PathCommand::MoveTo(_), PathCommand::LineTo(_)]));

    let mut ends = path_points(path);
    ends.sort();
    assert_eq!(ends, vec![(10, 10), (70, 70)]);
}

#[test]
fn filled_square_becomes_a_curved_outline() {
    let mut sketch = blank_sketch(80, 80);
    ink_rect(&mut sketch, 20, 20, 40, 40);

    let paths = vectorize(&sketch, &VectorizeParams::default());
    assert_eq!(paths.len(), 1);

    let path = &paths[0];
    assert!(path.has_curves());
    let text = path.to_string();
    assert!(text.starts_with("M "));
    assert!(text.contains(" Q "));
    for (x, y) in path_points(path) {
        assert!((20..=59).contains(&x) && (20..=59).contains(&y), "({x}, {y}) outside square");
    }
}

#[test]
fn short_contour_is_rejected_despite_many_points() {
    // 4x3 rectangle border: 10 traced points, corner-to-corner length 3 + 2 + 3 = 8
    let boundary: Vec<Point<i32>> = [
        (0, 0), (1, 0), (2, 0), (3, 0), (3, 1),
        (3, 2), (2, 2), (1, 2), (0, 2), (0, 1),
    ]
    .iter()
    .map(|&(x, y)| Point::new(x, y))
    .collect();

    let contour = TracedContour::from_boundary(boundary);
    assert!(contour.boundary.len() >= 4);
    assert!((contour.arc_length() - 8.0).abs() < 1e-9);
    assert!(vectorize_contour(&contour, &VectorizeParams::default()).is_none());
}

#[test]
fn short_ink_blob_leaves_no_path() {
    let mut sketch = blank_sketch(30, 30);
    ink_rect(&mut sketch, 10, 10, 4, 3);
    assert!(vectorize(&sketch, &VectorizeParams::default()).is_empty());
}

#[test]
fn too_few_traced_points_are_rejected() {
    let contour = TracedContour::from_boundary(vec![Point::new(0, 0), Point::new(20, 0), Point::new(40, 0)]);
    assert!(vectorize_contour(&contour, &VectorizeParams::default()).is_none());
}

fn contour_of(points: &[(i32, i32)]) -> TracedContour {
    let points: Vec<Point<i32>> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
    TracedContour {
        boundary: points.clone(),
        dominant: points,
    }
}

#[test]
fn collinear_run_simplifies_to_its_end_points() {
    let points: Vec<(i32, i32)> = (0..10).map(|i| (i, 2 * i)).collect();
    let path = vectorize_contour(&contour_of(&points), &VectorizeParams::default()).unwrap();
    assert_eq!(path.to_string(), "M 0 0 L 9 18");
}

#[test]
fn sharp_corner_survives_simplification() {
    let contour = contour_of(&[(0, 0), (5, 0), (10, 0), (10, 10)]);
    assert!((contour.arc_length() - 20.0).abs() < 1e-9);

    let path = vectorize_contour(&contour, &VectorizeParams::default()).unwrap();
    assert_eq!(path.to_string(), "M 0 0 Q 10 0 10 10");
}

#[test]
fn zero_tolerance_keeps_every_dominant_point() {
    let params = VectorizeParams {
        epsilon_tiers: Vec::new(),
        epsilon_fallback: 0.0,
        ..VectorizeParams::default()
    };
    let contour = contour_of(&[(0, 0), (5, 0), (10, 0), (10, 10)]);
    let path = vectorize_contour(&contour, &params).unwrap();
    assert_eq!(path.commands().len(), 4);
}

#[test]
fn epsilon_follows_length_tiers() {
    let params = VectorizeParams::default();
    let close = |a: f64, b: f64| (a - b).abs() < 1e-9;

    assert!(close(params.epsilon(300.0), 0.3));
    assert!(close(params.epsilon(200.0), 0.4));
    assert!(close(params.epsilon(150.0), 0.3));
    assert!(close(params.epsilon(100.0), 0.3));
    assert!(close(params.epsilon(75.0), 0.225));
    assert!(close(params.epsilon(50.0), 0.25));
    assert!(close(params.epsilon(20.0), 0.1));
}

#[test]
fn epsilon_is_monotonic_for_long_contours() {
    let params = VectorizeParams::default();
    let mut previous = params.epsilon(200.5);
    for step in 1..2000 {
        let length = 200.5 + step as f64 * 0.75;
        let eps = params.epsilon(length);
        assert!(eps >= previous, "epsilon dropped at length {length}");
        previous = eps;
    }
}

#[test]
fn every_path_has_two_distinct_points() {
    let mut sketch = blank_sketch(120, 120);
    ink_rect(&mut sketch, 10, 10, 30, 5);
    ink_rect(&mut sketch, 60, 60, 25, 25);
    ink_rect(&mut sketch, 100, 10, 2, 2);
    for i in 0..40 {
        sketch.put_pixel(20 + i, 70 + i / 2, Luma([0]));
    }

    for path in vectorize(&sketch, &VectorizeParams::default()) {
        let mut points = path_points(&path);
        points.sort();
        points.dedup();
        assert!(points.len() >= 2, "degenerate path {path}");
        assert!(matches!(path.commands()[0], PathCommand::MoveTo(_)));
    }
}
