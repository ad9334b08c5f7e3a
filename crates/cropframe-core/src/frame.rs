//! The committed crop frame and its bounds-constrained transitions.
//!
//! A [`CropFrameController`] is a small `Copy` value: the image bounds the
//! frame lives in, the frame size, and its top-left position (the
//! accumulated pan). Every transition returns a new value and never mutates
//! in place, so a caller always holds either the old or the new fully
//! consistent state.
//!
//! # Invariants
//!
//! After every committed transition:
//! - the frame lies inside the image bounds
//! - width and height are at least the configured minimum, unless the bounds
//!   themselves are smaller
//! - with the aspect ratio locked, `width / height == fixed_aspect_ratio`
//!
//! A transition whose result has a non-finite or non-positive dimension is
//! rejected and returns the previous state unchanged.
//!
//! # Known Approximation
//!
//! When a resize clamps both axes, the width clamp runs last and, when the
//! aspect ratio is locked, re-derives the height from it. That can move the
//! height away from the value the height clamp picked. This is accepted.

use crate::config::EditorConfig;
use crate::geometry::{CropRect, ImageBounds, Point, Rect, Size};
use tracing::{debug, trace};

/// Which edges a resize drags. The opposite edges stay anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Corner {
    pub is_left: bool,
    pub is_top: bool,
}

impl Corner {
    pub const TOP_LEFT: Corner = Corner::new(true, true);
    pub const TOP_RIGHT: Corner = Corner::new(false, true);
    pub const BOTTOM_LEFT: Corner = Corner::new(true, false);
    pub const BOTTOM_RIGHT: Corner = Corner::new(false, false);

    pub const fn new(is_left: bool, is_top: bool) -> Self {
        Self { is_left, is_top }
    }
}

/// Signed growth of the frame derived from a raw drag translation.
///
/// Positive values grow the frame along that axis. With the aspect ratio
/// locked, the dominant axis is picked by comparing the *raw* deltas
/// (`delta_x < delta_y` lets the horizontal axis drive) and the other axis
/// is derived from it. The anchor sign only applies to the signed values.
pub fn resize_growth(delta_x: f64, delta_y: f64, corner: Corner, config: &EditorConfig) -> Point {
    let sign_x = if corner.is_left { -1.0 } else { 1.0 };
    let sign_y = if corner.is_top { -1.0 } else { 1.0 };

    let signed_x = sign_x * delta_x;
    let signed_y = sign_y * delta_y;

    if !config.is_aspect_ratio_locked {
        return Point::new(signed_x, signed_y);
    }

    let ratio = config.fixed_aspect_ratio;
    if delta_x < delta_y {
        Point::new(signed_x, signed_x / ratio)
    } else {
        Point::new(signed_y * ratio, signed_y)
    }
}

/// Place `value` in `[lower, upper]`, checking the lower edge first.
///
/// When the frame is larger than the bounds (`upper < lower`) the lower
/// edge wins, matching a frame pinned to the bounds origin.
fn clamp_axis(value: f64, lower: f64, upper: f64) -> f64 {
    if value <= lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}

/// Committed crop state: bounds, frame size and accumulated pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropFrameController {
    config: EditorConfig,
    bounds: ImageBounds,
    size: Size,
    pan: Point,
}

impl CropFrameController {
    /// An empty controller with no bounds yet.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            bounds: Rect::default(),
            size: Size::default(),
            pan: Point::default(),
        }
    }

    /// Build a controller from an explicit state, e.g. one restored by a host.
    ///
    /// The state is taken as-is; the next transition enforces the invariants.
    pub fn from_parts(config: EditorConfig, bounds: ImageBounds, crop: CropRect) -> Self {
        Self {
            config,
            bounds,
            size: crop.size(),
            pan: crop.origin(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn bounds(&self) -> ImageBounds {
        self.bounds
    }

    /// The committed frame size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The committed top-left of the frame.
    pub fn accumulated_pan(&self) -> Point {
        self.pan
    }

    /// The committed frame as a rectangle.
    pub fn crop_rect(&self) -> CropRect {
        Rect::from_origin_size(self.pan, self.size)
    }

    /// Largest frame of the target aspect ratio that fits `bounds`, pinned
    /// to the bounds origin.
    ///
    /// With the aspect ratio locked the target is `fixed_aspect_ratio`;
    /// otherwise the frame covers the bounds exactly. Any previous position
    /// and size are discarded.
    #[must_use]
    pub fn reinitialize_for_image_bounds(&self, bounds: ImageBounds) -> Self {
        let size = if self.config.is_aspect_ratio_locked {
            let ratio = self.config.fixed_aspect_ratio;
            if ratio < bounds.aspect_ratio() {
                Size::new(bounds.height * ratio, bounds.height)
            } else {
                Size::new(bounds.width, bounds.width / ratio)
            }
        } else {
            bounds.size()
        };

        if !size.is_valid() || !bounds.origin().is_finite() {
            debug!(?bounds, "rejected crop reinitialization for degenerate bounds");
            return *self;
        }

        let next = Self {
            bounds,
            size,
            pan: bounds.origin(),
            ..*self
        };
        next.pan(0.0, 0.0)
    }

    /// Move the frame by a delta, clamped per axis to the bounds.
    ///
    /// The result is inside the bounds for any delta, including infinite
    /// ones. The frame size is unchanged.
    #[must_use]
    pub fn pan(&self, delta_x: f64, delta_y: f64) -> Self {
        let b = self.bounds;
        let x = clamp_axis(
            self.pan.x + delta_x,
            b.x,
            b.x + b.width - self.size.width,
        );
        let y = clamp_axis(
            self.pan.y + delta_y,
            b.y,
            b.y + b.height - self.size.height,
        );

        let pan = Point::new(x, y);
        if !pan.is_finite() || !self.size.is_valid() {
            debug!(delta_x, delta_y, "rejected crop pan");
            return *self;
        }

        trace!(x, y, "committed crop pan");
        Self { pan, ..*self }
    }

    /// Resize the frame by dragging the edges named by `corner`.
    ///
    /// The growth is derived by [`resize_growth`], the candidate size is
    /// clamped to the bounds and the minimum (height first, then width,
    /// re-deriving the other axis when locked), and the dragged edges move
    /// while the opposite edges stay put. The position is then re-clamped
    /// to the bounds exactly as a zero pan would.
    #[must_use]
    pub fn resize(&self, delta_x: f64, delta_y: f64, corner: Corner) -> Self {
        let growth = resize_growth(delta_x, delta_y, corner, &self.config);
        let locked = self.config.is_aspect_ratio_locked;
        let ratio = self.config.fixed_aspect_ratio;
        let min = self.config.minimum_crop_dimensions;
        let max = self.bounds.size();

        let mut width = self.size.width + growth.x;
        let mut height = self.size.height + growth.y;

        if height > max.height {
            height = max.height;
            if locked {
                width = height * ratio;
            }
        } else if height < min.height {
            height = min.height;
            if locked {
                width = height * ratio;
            }
        }

        if width > max.width {
            width = max.width;
            if locked {
                height = width / ratio;
            }
        } else if width < min.width {
            width = min.width;
            if locked {
                height = width / ratio;
            }
        }

        let size = Size::new(width, height);
        let pan = Point::new(
            if corner.is_left { self.pan.x - growth.x } else { self.pan.x },
            if corner.is_top { self.pan.y - growth.y } else { self.pan.y },
        );

        if !size.is_valid() || !pan.is_finite() {
            debug!(delta_x, delta_y, ?corner, "rejected crop resize");
            return *self;
        }

        trace!(width, height, "committed crop resize");
        Self { size, pan, ..*self }.pan(0.0, 0.0)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
