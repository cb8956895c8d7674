mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from sketchpath for tests
pub use sketchpath::{
    extract_sketch, ink_coverage, process_image, vectorize, CurvePath, PathCommand,
    ProcessOptions, SketchError, SketchParams, VectorizeParams,
};
