//! Crop engine WASM bindings.
//!
//! The host forwards viewport measurements, image changes and gesture events
//! in order; the engine answers with the rectangles to render and, on
//! commit, the crop region in source pixels.

use cropframe_core::{
    CropEngine, EditorConfig, GestureEvent, ImageMeta, Rect, Size, SourceCropRegion,
};
use wasm_bindgen::prelude::*;

/// JavaScript-accessible crop engine.
///
/// # Example (TypeScript)
/// ```typescript
/// const engine = new JsCropEngine(0, 0, 1.6, false);
/// engine.set_viewport(375, 600);
/// engine.set_image("file:///photo.jpg", 4032, 3024);
///
/// // Overlay rendering (includes the live gesture preview)
/// overlay.style.left = `${engine.crop_x}px`;
/// overlay.style.width = `${engine.crop_width}px`;
/// ```
#[wasm_bindgen]
pub struct JsCropEngine {
    inner: CropEngine,
}

#[wasm_bindgen]
impl JsCropEngine {
    /// Create an engine from individual config values.
    ///
    /// # Errors
    /// Returns error if the aspect ratio or minimum dimensions are invalid
    #[wasm_bindgen(constructor)]
    pub fn new(
        min_width: f64,
        min_height: f64,
        fixed_aspect_ratio: f64,
        is_aspect_ratio_locked: bool,
    ) -> Result<JsCropEngine, JsValue> {
        let config = EditorConfig {
            minimum_crop_dimensions: Size::new(min_width, min_height),
            fixed_aspect_ratio,
            is_aspect_ratio_locked,
            ..EditorConfig::default()
        };
        Self::from_core_config(config)
    }

    /// Create an engine from a config object:
    /// `{ minimumCropDimensions?, fixedAspectRatio?, isAspectRatioLocked?, mode? }`.
    ///
    /// # Errors
    /// Returns error if the object cannot be deserialized or is invalid
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue) -> Result<JsCropEngine, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| crate::js_error("Invalid editor config", e))?;
        Self::from_core_config(config)
    }

    /// Record the measured size of the image container.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.inner.set_viewport(Size::new(width, height));
    }

    /// Replace the displayed image. Resets the crop frame.
    pub fn set_image(&mut self, id: String, width: u32, height: u32) {
        self.inner.set_image(ImageMeta::new(id, width, height));
    }

    #[wasm_bindgen(getter)]
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    /// Start a gesture at a point relative to the crop frame's top-left.
    ///
    /// Returns the touched section name (e.g. `"topleft"`), or undefined if
    /// a gesture is already active.
    pub fn gesture_begin(&mut self, local_x: f64, local_y: f64) -> Option<String> {
        self.inner
            .gesture_begin(local_x, local_y)
            .map(|section| section.name().to_string())
    }

    /// Feed the cumulative translation since the gesture began.
    pub fn gesture_move(&mut self, translation_x: f64, translation_y: f64) {
        self.inner.gesture_move(translation_x, translation_y);
    }

    /// Finish the gesture and commit it. Returns false if none was active.
    pub fn gesture_end(&mut self, translation_x: f64, translation_y: f64) -> bool {
        self.inner.gesture_end(translation_x, translation_y).is_some()
    }

    /// Dispatch a `{ phase, localX, localY, translationX, translationY }` event.
    ///
    /// # Errors
    /// Returns error if the event cannot be deserialized
    pub fn handle_gesture(&mut self, event: JsValue) -> Result<(), JsValue> {
        let event: GestureEvent = serde_wasm_bindgen::from_value(event)
            .map_err(|e| crate::js_error("Invalid gesture event", e))?;
        self.inner.handle_gesture(event);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn is_gesture_active(&self) -> bool {
        self.inner.is_gesture_active()
    }

    #[wasm_bindgen(getter)]
    pub fn scale_factor(&self) -> f64 {
        self.inner.current_scale_factor()
    }

    #[wasm_bindgen(getter)]
    pub fn bounds_x(&self) -> f64 {
        self.inner.current_image_bounds().x
    }

    #[wasm_bindgen(getter)]
    pub fn bounds_y(&self) -> f64 {
        self.inner.current_image_bounds().y
    }

    #[wasm_bindgen(getter)]
    pub fn bounds_width(&self) -> f64 {
        self.inner.current_image_bounds().width
    }

    #[wasm_bindgen(getter)]
    pub fn bounds_height(&self) -> f64 {
        self.inner.current_image_bounds().height
    }

    /// Left edge of the rendered crop frame, including the live preview
    #[wasm_bindgen(getter)]
    pub fn crop_x(&self) -> f64 {
        self.crop_rect().x
    }

    /// Top edge of the rendered crop frame, including the live preview
    #[wasm_bindgen(getter)]
    pub fn crop_y(&self) -> f64 {
        self.crop_rect().y
    }

    #[wasm_bindgen(getter)]
    pub fn crop_width(&self) -> f64 {
        self.crop_rect().width
    }

    #[wasm_bindgen(getter)]
    pub fn crop_height(&self) -> f64 {
        self.crop_rect().height
    }

    /// The committed crop frame in source pixels, or undefined until both a
    /// viewport and a non-empty image are set.
    pub fn source_crop_region(&self) -> Option<JsCropRegion> {
        self.inner
            .compute_source_crop_region()
            .map(|inner| JsCropRegion { inner })
    }
}

impl JsCropEngine {
    fn from_core_config(config: EditorConfig) -> Result<JsCropEngine, JsValue> {
        let inner = CropEngine::new(config).map_err(|e| crate::js_error("Invalid editor config", e))?;
        Ok(JsCropEngine { inner })
    }

    fn crop_rect(&self) -> Rect {
        self.inner.current_crop_rect()
    }
}

/// Crop region in source pixels, ready for an image manipulator.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsCropRegion {
    inner: SourceCropRegion,
}

#[wasm_bindgen]
impl JsCropRegion {
    #[wasm_bindgen(getter)]
    pub fn origin_x(&self) -> u32 {
        self.inner.origin_x
    }

    #[wasm_bindgen(getter)]
    pub fn origin_y(&self) -> u32 {
        self.inner.origin_y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// The region as `{ originX, originY, width, height }`.
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_object(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| crate::js_error("serialize", e))
    }
}
