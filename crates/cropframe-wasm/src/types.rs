//! Pixel images passed between JavaScript and the crop helpers.

use cropframe_core::RgbBuffer;
use wasm_bindgen::prelude::*;

/// An RGB image held in WASM memory.
///
/// Built from raw pixels or decoded from JPEG/PNG bytes, then handed to
/// `crop_region`, `rotate_quarter` or `trim_border`. Each helper returns a new
/// image and leaves its input untouched.
#[wasm_bindgen]
pub struct JsRgbImage {
    buffer: RgbBuffer,
}

#[wasm_bindgen]
impl JsRgbImage {
    /// Wrap raw pixels, 3 bytes per pixel, row-major.
    ///
    /// # Errors
    /// Returns error if `pixels` is not exactly `width * height * 3` bytes
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRgbImage, JsValue> {
        let buffer = RgbBuffer::new(width, height, pixels);
        buffer
            .validate()
            .map_err(|e| crate::js_error("Invalid pixel buffer", e))?;
        Ok(JsRgbImage { buffer })
    }

    /// Decode JPEG or PNG bytes.
    ///
    /// # Errors
    /// Returns error if the bytes are not a supported image
    pub fn decode(bytes: &[u8]) -> Result<JsRgbImage, JsValue> {
        RgbBuffer::decode(bytes)
            .map(JsRgbImage::from_buffer)
            .map_err(|e| crate::js_error("decode", e))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.buffer.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.buffer.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.buffer.pixels.len()
    }

    /// Copy the pixels out as a `Uint8Array`.
    pub fn pixels(&self) -> Vec<u8> {
        self.buffer.pixels.clone()
    }
}

impl JsRgbImage {
    pub(crate) fn from_buffer(buffer: RgbBuffer) -> Self {
        Self { buffer }
    }

    pub(crate) fn buffer(&self) -> &RgbBuffer {
        &self.buffer
    }
}
