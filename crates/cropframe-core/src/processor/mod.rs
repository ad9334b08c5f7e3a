//! The boundary to the service that performs the actual pixel work.
//!
//! The geometry engine only produces a [`SourceCropRegion`]; cropping and
//! rotating pixels is delegated to an [`ImageProcessor`]. Hosts usually
//! implement it on top of their platform's image manipulator, possibly
//! asynchronously (see [`crate::editor::Editor::begin_crop`]).
//! [`BufferProcessor`] is an in-memory implementation over RGB buffers.
//!
//! # Operation Order
//!
//! Operations in one request are applied in sequence, each one to the
//! output of the previous one.

mod buffer;

pub use buffer::{BufferProcessor, RgbBuffer};

use crate::error::ProcessingError;
use crate::geometry::{ImageMeta, SourceCropRegion};
use serde::{Deserialize, Serialize};

/// One pixel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditOp {
    /// Crop to a region in source pixels.
    Crop(SourceCropRegion),
    /// Rotate by a multiple of 90 degrees, positive = clockwise.
    Rotate(i32),
    /// Remove a border of the given width from every edge.
    TrimBorder(u32),
}

/// Performs pixel operations and returns the metadata of the new image.
pub trait ImageProcessor {
    fn apply(&mut self, source: &ImageMeta, ops: &[EditOp]) -> Result<ImageMeta, ProcessingError>;
}
