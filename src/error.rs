use thiserror::Error;

/// Failures surfaced by [`crate::process_image`].
///
/// Both kinds are all-or-nothing: no partial output is returned and nothing
/// is retried, since the pipeline is deterministic.
#[derive(Debug, Error)]
pub enum SketchError {
    /// The image was missing, empty, or could not be decoded.
    #[error("invalid input image: {0}")]
    InvalidInput(String),

    /// Something failed inside the sketch pipeline or the vectorizer.
    #[error("sketch processing failed: {0}")]
    Processing(#[source] anyhow::Error),
}

impl From<anyhow::Error> for SketchError {
    fn from(err: anyhow::Error) -> Self {
        SketchError::Processing(err)
    }
}

impl From<image::ImageError> for SketchError {
    fn from(err: image::ImageError) -> Self {
        SketchError::InvalidInput(err.to_string())
    }
}
