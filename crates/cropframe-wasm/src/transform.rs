//! WASM bindings for pixel crop and rotation.
//!
//! Hosts that have no native image manipulator can apply the source crop
//! region computed by `JsCropEngine` with these helpers.

use crate::types::JsRgbImage;
use cropframe_core::SourceCropRegion;
use wasm_bindgen::prelude::*;

/// Crop an image to a region in source pixels.
///
/// The region is clamped to the image.
///
/// # Errors
/// Returns error if the region is empty or starts outside the image, or if
/// the image's pixel buffer does not match its dimensions
///
/// # Example (TypeScript)
///
/// ```typescript
/// const r = engine.source_crop_region();
/// const cropped = crop_region(image, r.origin_x, r.origin_y, r.width, r.height);
/// ```
#[wasm_bindgen]
pub fn crop_region(
    image: &JsRgbImage,
    origin_x: u32,
    origin_y: u32,
    width: u32,
    height: u32,
) -> Result<JsRgbImage, JsValue> {
    let region = SourceCropRegion::new(origin_x, origin_y, width, height);
    image
        .buffer()
        .crop(&region)
        .map(JsRgbImage::from_buffer)
        .map_err(|e| crate::js_error("crop", e))
}

/// Rotate an image clockwise by a multiple of 90 degrees.
///
/// # Errors
/// Returns error for angles that are not quarter turns
#[wasm_bindgen]
pub fn rotate_quarter(image: &JsRgbImage, degrees: i32) -> Result<JsRgbImage, JsValue> {
    image
        .buffer()
        .rotate(degrees)
        .map(JsRgbImage::from_buffer)
        .map_err(|e| crate::js_error("rotate", e))
}

/// Remove `border` pixels from every edge.
///
/// # Errors
/// Returns error if nothing would remain
#[wasm_bindgen]
pub fn trim_border(image: &JsRgbImage, border: u32) -> Result<JsRgbImage, JsValue> {
    image
        .buffer()
        .trim_border(border)
        .map(JsRgbImage::from_buffer)
        .map_err(|e| crate::js_error("trim", e))
}
