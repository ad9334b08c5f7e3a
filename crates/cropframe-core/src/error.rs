//! Error types for configuration, image processing and editor sessions.
//!
//! Geometry operations never fail: degenerate results are rejected in place
//! and the previous state is kept. Only configuration and the external
//! processing step produce errors.

use thiserror::Error;

/// Invalid editor configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The fixed aspect ratio must be finite and strictly positive.
    #[error("Invalid fixed aspect ratio: {0}")]
    InvalidAspectRatio(f64),

    /// Minimum crop dimensions must be finite and non-negative.
    #[error("Invalid minimum crop dimensions: {width}x{height}")]
    InvalidMinimumDimensions { width: f64, height: f64 },
}

/// Failures of the image-processing step that performs the actual pixel work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    /// The processor does not know the requested image.
    #[error("Unknown image: {0}")]
    UnknownImage(String),

    /// The crop region does not overlap the image.
    #[error("Crop region is empty after clamping to the image")]
    EmptyRegion,

    /// The pixel buffer length does not match `width * height * 3`.
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: u64, actual: u64 },

    /// Only quarter turns are supported.
    #[error("Unsupported rotation angle: {0}")]
    UnsupportedRotation(i32),

    /// Encoded image data could not be decoded.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Any other failure reported by an external processor.
    #[error("Processing failed: {0}")]
    Failed(String),
}

/// Errors surfaced by an editing session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// An edit is already being processed.
    #[error("An edit is already in progress")]
    Busy,

    /// No image has been loaded yet.
    #[error("No image loaded")]
    NoImage,

    /// The viewport has not been measured, so there is no crop geometry yet.
    #[error("Editor is not ready")]
    NotReady,

    /// The edit was handed to the processor and failed; geometry is unchanged.
    #[error("An error occurred while editing: {0}")]
    OperationFailed(#[from] ProcessingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::InvalidAspectRatio(-1.0).to_string(),
            "Invalid fixed aspect ratio: -1"
        );
        assert_eq!(
            ProcessingError::UnknownImage("a.jpg".into()).to_string(),
            "Unknown image: a.jpg"
        );
        assert_eq!(
            EditorError::OperationFailed(ProcessingError::EmptyRegion).to_string(),
            "An error occurred while editing: Crop region is empty after clamping to the image"
        );
    }

    #[test]
    fn test_processing_error_converts_to_editor_error() {
        let err: EditorError = ProcessingError::UnsupportedRotation(45).into();
        assert_eq!(
            err,
            EditorError::OperationFailed(ProcessingError::UnsupportedRotation(45))
        );
    }
}
