//! Fitting an image into a viewport.
//!
//! The image is scaled to fill the viewport along one axis while keeping its
//! aspect ratio, and centered along the other (letterbox or pillarbox).
//!
//! # Algorithm
//!
//! With `image_ar = image.height / image.width` and
//! `viewport_ar = viewport.height / viewport.width`:
//!
//! ```text
//! image_ar > viewport_ar  →  full height, horizontal margins
//! otherwise               →  full width, vertical margins
//! ```
//!
//! The scale factor is measured along the filled axis, so it is exact for
//! the dimension that was not letterboxed.

use crate::geometry::{ImageBounds, ImageMeta, Rect, ViewportLayout};
use serde::{Deserialize, Serialize};

/// Result of fitting an image into a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FittedImage {
    /// Where the image is drawn inside the viewport
    pub bounds: ImageBounds,
    /// Source pixels per viewport pixel
    pub scale_factor: f64,
}

impl Default for FittedImage {
    fn default() -> Self {
        Self {
            bounds: Rect::default(),
            scale_factor: 1.0,
        }
    }
}

impl FittedImage {
    /// True when the fit produced an image with a usable area.
    pub fn has_area(&self) -> bool {
        self.bounds.size().is_valid()
    }
}

/// Compute where an image sits inside a viewport and the scale between them.
///
/// Pure and deterministic. Degenerate inputs (any zero, negative or
/// non-finite dimension) produce a zero-area rectangle at the origin with a
/// scale factor of 1 instead of propagating NaN or infinity.
///
/// # Example
///
/// ```ignore
/// // 2:1 image in a tall viewport is pillarboxed
/// let fit = compute_bounds(&Size::new(300.0, 600.0), &ImageMeta::new("a", 1200, 600));
/// assert_eq!(fit.bounds, Rect::new(0.0, 225.0, 300.0, 150.0));
/// assert_eq!(fit.scale_factor, 4.0);
/// ```
pub fn compute_bounds(viewport: &ViewportLayout, image: &ImageMeta) -> FittedImage {
    if !viewport.is_valid() || image.width == 0 || image.height == 0 {
        return FittedImage::default();
    }

    let image_width = image.width as f64;
    let image_height = image.height as f64;

    let image_ar = image_height / image_width;
    let viewport_ar = viewport.height / viewport.width;

    if image_ar > viewport_ar {
        // Relatively taller than the viewport: fill the height
        let height = viewport.height;
        let width = height / image_ar;
        let x = ((image_ar - viewport_ar) / image_ar) * viewport.width / 2.0;
        FittedImage {
            bounds: Rect::new(x, 0.0, width, height),
            scale_factor: image_height / height,
        }
    } else {
        let width = viewport.width;
        let height = width * image_ar;
        let y = ((1.0 / image_ar - 1.0 / viewport_ar) / (1.0 / image_ar)) * viewport.height / 2.0;
        FittedImage {
            bounds: Rect::new(0.0, y, width, height),
            scale_factor: image_width / width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    const EPS: f64 = 1e-9;

    fn image(width: u32, height: u32) -> ImageMeta {
        ImageMeta::new("test", width, height)
    }

    #[test]
    fn test_wide_image_in_tall_viewport() {
        let fit = compute_bounds(&Size::new(300.0, 600.0), &image(1200, 600));

        assert_eq!(fit.bounds, Rect::new(0.0, 225.0, 300.0, 150.0));
        assert_eq!(fit.scale_factor, 4.0);
    }

    #[test]
    fn test_tall_image_in_wide_viewport() {
        let fit = compute_bounds(&Size::new(800.0, 400.0), &image(1000, 2000));

        // Height fills the viewport, width is half of it, centered
        assert!((fit.bounds.height - 400.0).abs() < EPS);
        assert!((fit.bounds.width - 200.0).abs() < EPS);
        assert!((fit.bounds.x - 300.0).abs() < EPS);
        assert_eq!(fit.bounds.y, 0.0);
        assert!((fit.scale_factor - 5.0).abs() < EPS);
    }

    #[test]
    fn test_matching_aspect_ratio_fills_viewport() {
        let fit = compute_bounds(&Size::new(400.0, 300.0), &image(800, 600));

        assert_eq!(fit.bounds.x, 0.0);
        assert!(fit.bounds.y.abs() < EPS);
        assert_eq!(fit.bounds.width, 400.0);
        assert!((fit.bounds.height - 300.0).abs() < EPS);
        assert_eq!(fit.scale_factor, 2.0);
    }

    #[test]
    fn test_bounds_are_centered_and_contained() {
        let viewport = Size::new(375.0, 667.0);
        let fit = compute_bounds(&viewport, &image(4032, 3024));
        let b = fit.bounds;

        let container = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        assert!(container.contains_rect(&b, EPS));
        // Centered vertically
        assert!((b.y - (viewport.height - b.bottom())).abs() < EPS);
        // Aspect ratio preserved
        assert!((b.width / b.height - 4032.0 / 3024.0).abs() < EPS);
    }

    #[test]
    fn test_degenerate_inputs() {
        let cases = [
            (Size::new(0.0, 600.0), image(100, 100)),
            (Size::new(300.0, 0.0), image(100, 100)),
            (Size::new(300.0, 600.0), image(0, 100)),
            (Size::new(300.0, 600.0), image(100, 0)),
            (Size::new(f64::NAN, 600.0), image(100, 100)),
            (Size::new(-300.0, 600.0), image(100, 100)),
        ];

        for (viewport, img) in cases {
            let fit = compute_bounds(&viewport, &img);
            assert_eq!(fit.bounds, Rect::default());
            assert_eq!(fit.scale_factor, 1.0);
            assert!(!fit.has_area());
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
