//! Cropframe WASM - WebAssembly bindings for the crop geometry engine
//!
//! This crate exposes cropframe-core to JavaScript/TypeScript hosts. The host
//! owns rendering and input; it forwards layout, image and gesture events to
//! a `JsCropEngine` and reads back the rectangles to draw.
//!
//! # Module Structure
//!
//! - `engine` - Crop engine bindings (layout, gestures, source region)
//! - `types` - `JsRgbImage`, the pixel image handed to the transform helpers
//! - `transform` - Pixel crop/rotate helpers for hosts without their own
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEngine } from '@cropframe/wasm';
//!
//! await init();
//!
//! const engine = JsCropEngine.fromConfig({ fixedAspectRatio: 1.6, isAspectRatioLocked: true });
//! engine.set_viewport(layout.width, layout.height);
//! engine.set_image(uri, image.width, image.height);
//!
//! // Pan/resize gestures
//! engine.gesture_begin(e.localX, e.localY);
//! engine.gesture_move(e.translationX, e.translationY);
//! engine.gesture_end(e.translationX, e.translationY);
//!
//! const region = engine.source_crop_region();
//! ```

use wasm_bindgen::prelude::*;

mod engine;
mod transform;
mod types;

// Re-export public types
pub use engine::{JsCropEngine, JsCropRegion};
pub use transform::{crop_region, rotate_quarter, trim_border};
pub use types::JsRgbImage;

/// Runs once when the module loads.
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(concat!(
        "cropframe-wasm ",
        env!("CARGO_PKG_VERSION")
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Report an error to the browser console and convert it for JavaScript.
///
/// Only call on wasm32 targets: creating a `JsValue` panics elsewhere.
pub(crate) fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    let message = format!("{}: {}", context, err);
    web_sys::console::error_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}
