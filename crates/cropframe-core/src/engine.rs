//! The crop engine: one value that owns all crop geometry for a session.
//!
//! Inputs arrive serially from the host: viewport measurements, image
//! replacements and gesture events. Each input is handled synchronously and
//! leaves the committed state consistent, so a reader between events always
//! sees a frame that satisfies every invariant.
//!
//! # Data Flow
//!
//! ```text
//! viewport + image ──► compute_bounds ──► reinitialize frame
//! gesture events   ──► GestureArbiter ──► preview ──(end)──► pan / resize
//! committed frame  ──► compute_source_crop_region ──► image processor
//! ```

use crate::config::EditorConfig;
use crate::error::ConfigError;
use crate::frame::CropFrameController;
use crate::geometry::{CropRect, ImageBounds, ImageMeta, Point, SourceCropRegion, ViewportLayout};
use crate::gesture::{GestureArbiter, GestureCommit, GestureEvent, GesturePhase, Preview, Section};
use crate::mapper::{compute_bounds, FittedImage};
use tracing::debug;

/// Crop geometry for one editing session.
#[derive(Debug, Clone)]
pub struct CropEngine {
    config: EditorConfig,
    viewport: Option<ViewportLayout>,
    image: Option<ImageMeta>,
    fitted: FittedImage,
    frame: CropFrameController,
    arbiter: GestureArbiter,
}

impl CropEngine {
    /// Create an engine from a validated configuration.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            viewport: None,
            image: None,
            fitted: FittedImage::default(),
            frame: CropFrameController::new(config),
            arbiter: GestureArbiter::new(),
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn viewport(&self) -> Option<ViewportLayout> {
        self.viewport
    }

    pub fn image(&self) -> Option<&ImageMeta> {
        self.image.as_ref()
    }

    /// True once both a viewport and an image with area are known.
    pub fn is_ready(&self) -> bool {
        self.viewport.is_some() && self.image.is_some() && self.fitted.has_area()
    }

    /// Record a new viewport measurement and reset the crop frame.
    pub fn set_viewport(&mut self, viewport: ViewportLayout) {
        self.viewport = Some(viewport);
        self.refit();
    }

    /// Replace the image and reset the crop frame.
    pub fn set_image(&mut self, image: ImageMeta) {
        self.image = Some(image);
        self.refit();
    }

    fn refit(&mut self) {
        let (Some(viewport), Some(image)) = (&self.viewport, &self.image) else {
            return;
        };

        self.fitted = compute_bounds(viewport, image);
        debug!(
            bounds = ?self.fitted.bounds,
            scale_factor = self.fitted.scale_factor,
            "recomputed image bounds"
        );
        self.frame = self.frame.reinitialize_for_image_bounds(self.fitted.bounds);
    }

    pub fn current_image_bounds(&self) -> ImageBounds {
        self.fitted.bounds
    }

    pub fn current_scale_factor(&self) -> f64 {
        self.fitted.scale_factor
    }

    /// The crop frame as it should be rendered, including any live preview.
    pub fn current_crop_rect(&self) -> CropRect {
        self.arbiter.preview().apply_to(self.frame.crop_rect())
    }

    /// The frame origin as it should be rendered, including any live preview.
    pub fn current_accumulated_pan(&self) -> Point {
        self.current_crop_rect().origin()
    }

    /// The committed frame, ignoring any gesture in progress.
    pub fn committed_crop_rect(&self) -> CropRect {
        self.frame.crop_rect()
    }

    pub fn frame(&self) -> &CropFrameController {
        &self.frame
    }

    pub fn preview(&self) -> Preview {
        self.arbiter.preview()
    }

    pub fn is_gesture_active(&self) -> bool {
        self.arbiter.is_tracking()
    }

    /// Start a gesture at a point relative to the frame's top-left (pixels).
    ///
    /// Ignored while there is no crop frame to touch.
    pub fn gesture_begin(&mut self, local_x: f64, local_y: f64) -> Option<Section> {
        let size = self.frame.size();
        if !size.is_valid() {
            debug!("ignored gesture begin without a crop frame");
            return None;
        }
        self.arbiter.begin(local_x / size.width, local_y / size.height)
    }

    /// Feed the cumulative translation of the active gesture.
    pub fn gesture_move(&mut self, translation_x: f64, translation_y: f64) -> Preview {
        self.arbiter.update(translation_x, translation_y, &self.config)
    }

    /// Finish the active gesture and commit it.
    pub fn gesture_end(&mut self, translation_x: f64, translation_y: f64) -> Option<GestureCommit> {
        let (frame, commit) = self.arbiter.end(translation_x, translation_y, &self.frame)?;
        self.frame = frame;
        Some(commit)
    }

    /// Dispatch a host gesture event by phase.
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event.phase {
            GesturePhase::Begin => {
                self.gesture_begin(event.local_x, event.local_y);
            }
            GesturePhase::Move => {
                self.gesture_move(event.translation_x, event.translation_y);
            }
            GesturePhase::End => {
                self.gesture_end(event.translation_x, event.translation_y);
            }
        }
    }

    /// The committed frame in source-image pixels.
    ///
    /// `None` until the engine is ready: after a degenerate image the frame
    /// still holds the previous bounds and the two cannot be combined.
    pub fn compute_source_crop_region(&self) -> Option<SourceCropRegion> {
        if !self.is_ready() {
            return None;
        }
        Some(source_crop_region(
            self.frame.accumulated_pan(),
            &self.frame.crop_rect(),
            &self.fitted.bounds,
            self.fitted.scale_factor,
        ))
    }
}

/// Convert a viewport crop into source pixels, rounding each component.
///
/// Negative or non-finite components saturate to zero.
pub fn source_crop_region(
    accumulated_pan: Point,
    crop: &CropRect,
    bounds: &ImageBounds,
    scale_factor: f64,
) -> SourceCropRegion {
    SourceCropRegion {
        origin_x: ((accumulated_pan.x - bounds.x) * scale_factor).round() as u32,
        origin_y: ((accumulated_pan.y - bounds.y) * scale_factor).round() as u32,
        width: (crop.width * scale_factor).round() as u32,
        height: (crop.height * scale_factor).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Size};

    fn engine(config: EditorConfig) -> CropEngine {
        let mut engine = CropEngine::new(config).unwrap();
        engine.set_viewport(Size::new(300.0, 600.0));
        engine.set_image(ImageMeta::new("photo.jpg", 1200, 600));
        engine
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(CropEngine::new(EditorConfig::locked(0.0)).is_err());
    }

    #[test]
    fn test_not_ready_until_viewport_and_image() {
        let mut engine = CropEngine::new(EditorConfig::new()).unwrap();
        assert!(!engine.is_ready());

        engine.set_image(ImageMeta::new("a", 100, 100));
        assert!(!engine.is_ready());
        assert_eq!(engine.current_image_bounds(), Rect::default());

        engine.set_viewport(Size::new(100.0, 100.0));
        assert!(engine.is_ready());
    }

    #[test]
    fn test_bounds_and_frame_from_layout() {
        let engine = engine(EditorConfig::new());

        assert_eq!(engine.current_image_bounds(), Rect::new(0.0, 225.0, 300.0, 150.0));
        assert_eq!(engine.current_scale_factor(), 4.0);
        assert_eq!(engine.current_crop_rect(), Rect::new(0.0, 225.0, 300.0, 150.0));
        assert_eq!(engine.compute_source_crop_region(), Some(SourceCropRegion::new(0, 0, 1200, 600)));
    }

    #[test]
    fn test_source_crop_region_conversion() {
        let region = source_crop_region(
            Point::new(10.0, 10.0),
            &Rect::new(10.0, 10.0, 50.0, 30.0),
            &Rect::new(0.0, 0.0, 200.0, 100.0),
            3.0,
        );
        assert_eq!(region, SourceCropRegion::new(30, 30, 150, 90));
    }

    #[test]
    fn test_source_crop_region_rounds() {
        let region = source_crop_region(
            Point::new(10.4, 0.0),
            &Rect::new(10.4, 0.0, 33.3, 10.1),
            &Rect::new(0.0, 0.0, 100.0, 100.0),
            1.5,
        );
        // 15.6 → 16, 49.95 → 50, 15.15 → 15
        assert_eq!(region, SourceCropRegion::new(16, 0, 50, 15));
    }

    #[test]
    fn test_pan_gesture_previews_then_commits() {
        let mut engine = engine(EditorConfig::locked(1.0));
        // 1:1 frame in 300x150 bounds: 150x150 at (0, 225)
        assert_eq!(engine.committed_crop_rect(), Rect::new(0.0, 225.0, 150.0, 150.0));

        assert_eq!(engine.gesture_begin(75.0, 75.0), Some(Section::MiddleMiddle));
        engine.gesture_move(400.0, 10.0);
        assert_eq!(engine.current_accumulated_pan(), Point::new(400.0, 235.0));
        assert_eq!(engine.committed_crop_rect().origin(), Point::new(0.0, 225.0));

        engine.gesture_end(400.0, 10.0);
        assert!(!engine.is_gesture_active());
        assert_eq!(engine.current_accumulated_pan(), Point::new(150.0, 225.0));
        assert_eq!(engine.compute_source_crop_region(), Some(SourceCropRegion::new(600, 0, 600, 600)));
    }

    #[test]
    fn test_resize_gesture_through_events() {
        let mut engine = engine(EditorConfig::new());

        engine.handle_gesture(GestureEvent::begin(290.0, 140.0));
        engine.handle_gesture(GestureEvent::moved(-100.0, -50.0));
        assert_eq!(engine.current_crop_rect(), Rect::new(0.0, 225.0, 200.0, 100.0));

        engine.handle_gesture(GestureEvent::end(-100.0, -50.0));
        assert_eq!(engine.committed_crop_rect(), Rect::new(0.0, 225.0, 200.0, 100.0));
        assert_eq!(engine.compute_source_crop_region(), Some(SourceCropRegion::new(0, 0, 800, 400)));
    }

    #[test]
    fn test_image_replacement_resets_frame() {
        let mut engine = engine(EditorConfig::new());
        engine.gesture_begin(1.0, 1.0);
        engine.gesture_end(50.0, 20.0);
        assert_ne!(engine.committed_crop_rect(), engine.current_image_bounds());

        engine.set_image(ImageMeta::new("cropped.jpg", 600, 1200));
        let bounds = engine.current_image_bounds();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 300.0, 600.0));
        assert_eq!(engine.committed_crop_rect(), bounds);
    }

    #[test]
    fn test_degenerate_image_keeps_previous_frame() {
        let mut engine = engine(EditorConfig::new());
        let before = engine.committed_crop_rect();

        engine.set_image(ImageMeta::new("empty", 0, 0));
        assert_eq!(engine.current_image_bounds(), Rect::default());
        assert_eq!(engine.current_scale_factor(), 1.0);
        assert_eq!(engine.committed_crop_rect(), before);
        assert!(!engine.is_ready());
        assert_eq!(engine.compute_source_crop_region(), None);
    }

    #[test]
    fn test_no_source_region_before_layout() {
        let mut engine = CropEngine::new(EditorConfig::new()).unwrap();
        engine.set_image(ImageMeta::new("photo.jpg", 1200, 600));
        assert_eq!(engine.compute_source_crop_region(), None);
    }

    #[test]
    fn test_gesture_needs_a_frame() {
        let mut engine = CropEngine::new(EditorConfig::new()).unwrap();
        assert_eq!(engine.gesture_begin(10.0, 10.0), None);
        assert!(!engine.is_gesture_active());
    }

    #[test]
    fn test_move_and_end_without_begin_are_ignored() {
        let mut engine = engine(EditorConfig::new());
        let before = engine.committed_crop_rect();

        assert_eq!(engine.gesture_move(10.0, 10.0), Preview::None);
        assert_eq!(engine.gesture_end(10.0, 10.0), None);
        assert_eq!(engine.committed_crop_rect(), before);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
