//! In-memory RGB buffers and a processor over them.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left pixel
//! - Regions are in whole pixels and are clamped to the image
//! - Rotation is clockwise in quarter turns

use std::collections::HashMap;

use super::{EditOp, ImageProcessor};
use crate::error::ProcessingError;
use crate::geometry::{ImageMeta, SourceCropRegion};
use image::imageops;
use tracing::{debug, warn};

/// An RGB image, 3 bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbBuffer {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Check that the pixel buffer holds exactly `width * height` RGB pixels.
    pub fn validate(&self) -> Result<(), ProcessingError> {
        let expected = u64::from(self.width) * u64::from(self.height) * 3;
        let actual = self.pixels.len() as u64;
        if expected == actual {
            Ok(())
        } else {
            Err(ProcessingError::BufferSizeMismatch { expected, actual })
        }
    }

    /// Decode JPEG or PNG bytes into an RGB buffer.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProcessingError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| ProcessingError::Decode(e.to_string()))?
            .to_rgb8();
        let (width, height) = img.dimensions();
        Ok(Self::new(width, height, img.into_raw()))
    }

    /// Copy out a region of the image.
    ///
    /// The region is clamped to the image. A region that is empty or starts
    /// outside the image is an error.
    pub fn crop(&self, region: &SourceCropRegion) -> Result<RgbBuffer, ProcessingError> {
        self.validate()?;
        if region.is_empty() || region.origin_x >= self.width || region.origin_y >= self.height {
            return Err(ProcessingError::EmptyRegion);
        }

        // Fast path: full crop returns a clone
        if region.origin_x == 0
            && region.origin_y == 0
            && region.width >= self.width
            && region.height >= self.height
        {
            return Ok(self.clone());
        }

        let left = region.origin_x;
        let top = region.origin_y;
        let right = left.saturating_add(region.width).min(self.width);
        let bottom = top.saturating_add(region.height).min(self.height);

        let out_width = right - left;
        let out_height = bottom - top;
        let row_bytes = (out_width * 3) as usize;

        let mut output = Vec::with_capacity(row_bytes * out_height as usize);

        // Rows are contiguous in the source, copy them whole
        for y in top..bottom {
            let start = ((y * self.width + left) * 3) as usize;
            output.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }

        Ok(RgbBuffer::new(out_width, out_height, output))
    }

    /// Rotate clockwise by a multiple of 90 degrees.
    pub fn rotate(&self, degrees: i32) -> Result<RgbBuffer, ProcessingError> {
        self.validate()?;
        let quarter = degrees.rem_euclid(360);
        if quarter == 0 {
            return Ok(self.clone());
        }

        let img = image::RgbImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or(
            ProcessingError::BufferSizeMismatch {
                expected: u64::from(self.width) * u64::from(self.height) * 3,
                actual: self.pixels.len() as u64,
            },
        )?;

        let rotated = match quarter {
            90 => imageops::rotate90(&img),
            180 => imageops::rotate180(&img),
            270 => imageops::rotate270(&img),
            _ => return Err(ProcessingError::UnsupportedRotation(degrees)),
        };

        let (width, height) = rotated.dimensions();
        Ok(RgbBuffer::new(width, height, rotated.into_raw()))
    }

    /// Remove `border` pixels from every edge.
    pub fn trim_border(&self, border: u32) -> Result<RgbBuffer, ProcessingError> {
        let region = SourceCropRegion::new(
            border,
            border,
            self.width.saturating_sub(border.saturating_mul(2)),
            self.height.saturating_sub(border.saturating_mul(2)),
        );
        self.crop(&region)
    }

    pub fn apply(&self, op: &EditOp) -> Result<RgbBuffer, ProcessingError> {
        match op {
            EditOp::Crop(region) => self.crop(region),
            EditOp::Rotate(degrees) => self.rotate(*degrees),
            EditOp::TrimBorder(border) => self.trim_border(*border),
        }
    }
}

/// An [`ImageProcessor`] over buffers kept in memory, keyed by image id.
///
/// Every successful request stores its result under a fresh id, so earlier
/// images (e.g. the original before a rotation) remain available.
#[derive(Debug, Default)]
pub struct BufferProcessor {
    images: HashMap<String, RgbBuffer>,
    next_edit: u64,
}

impl BufferProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a buffer under `id` and return its metadata.
    pub fn insert(&mut self, id: impl Into<String>, buffer: RgbBuffer) -> ImageMeta {
        let meta = ImageMeta::new(id, buffer.width, buffer.height);
        self.images.insert(meta.id.clone(), buffer);
        meta
    }

    pub fn get(&self, id: &str) -> Option<&RgbBuffer> {
        self.images.get(id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageProcessor for BufferProcessor {
    fn apply(&mut self, source: &ImageMeta, ops: &[EditOp]) -> Result<ImageMeta, ProcessingError> {
        let buffer = self
            .images
            .get(&source.id)
            .ok_or_else(|| ProcessingError::UnknownImage(source.id.clone()))?;

        let result = ops.iter().try_fold(buffer.clone(), |image, op| image.apply(op));
        let result = match result {
            Ok(result) => result,
            Err(e) => {
                warn!(source = %source.id, error = %e, "image edit failed");
                return Err(e);
            }
        };

        self.next_edit += 1;
        let id = format!("{}#{}", source.id, self.next_edit);
        debug!(%id, width = result.width, height = result.height, "stored edited image");
        Ok(self.insert(id, result))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
