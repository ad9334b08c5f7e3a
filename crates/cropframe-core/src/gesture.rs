//! Gesture arbitration: deciding whether a drag pans or resizes the frame.
//!
//! The crop frame is split into a 3×3 grid. The cell touched when a gesture
//! begins (its [`Section`]) is frozen for the whole gesture:
//!
//! ```text
//! ┌────────────┬────────────┬────────────┐
//! │ top-left   │ top-mid    │ top-right  │   corners resize
//! ├────────────┼────────────┼────────────┤
//! │ mid-left   │ mid-mid    │ mid-right  │   the cross pans
//! ├────────────┼────────────┼────────────┤
//! │ bottom-left│ bottom-mid │ bottom-right
//! └────────────┴────────────┴────────────┘
//! ```
//!
//! While a gesture is tracked only a preview is produced. The committed
//! frame changes once, when the gesture ends.

use crate::config::EditorConfig;
use crate::frame::{resize_growth, Corner, CropFrameController};
use crate::geometry::{CropRect, Point, Rect};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Upper edge of the first third of the frame (normalized).
const FIRST_THIRD: f64 = 1.0 / 3.0;
/// Upper edge of the second third of the frame (normalized).
const SECOND_THIRD: f64 = 2.0 / 3.0;

/// One of the nine cells of the crop frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    MiddleMiddle,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

/// Row-major lookup: `GRID[row][column]`.
const GRID: [[Section; 3]; 3] = [
    [Section::TopLeft, Section::TopMiddle, Section::TopRight],
    [Section::MiddleLeft, Section::MiddleMiddle, Section::MiddleRight],
    [Section::BottomLeft, Section::BottomMiddle, Section::BottomRight],
];

fn third(normalized: f64) -> usize {
    if normalized < FIRST_THIRD {
        0
    } else if normalized < SECOND_THIRD {
        1
    } else {
        2
    }
}

impl Section {
    /// Classify a point given in frame-local normalized coordinates
    /// (`0..1` across the frame on each axis).
    pub fn classify(px: f64, py: f64) -> Section {
        GRID[third(py)][third(px)]
    }

    /// Lowercase name, vertical label first (`"topleft"`, `"middlemiddle"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Section::TopLeft => "topleft",
            Section::TopMiddle => "topmiddle",
            Section::TopRight => "topright",
            Section::MiddleLeft => "middleleft",
            Section::MiddleMiddle => "middlemiddle",
            Section::MiddleRight => "middleright",
            Section::BottomLeft => "bottomleft",
            Section::BottomMiddle => "bottommiddle",
            Section::BottomRight => "bottomright",
        }
    }

    /// True for the five cross cells, which pan the frame.
    pub fn is_pan(self) -> bool {
        matches!(
            self,
            Section::TopMiddle
                | Section::MiddleLeft
                | Section::MiddleMiddle
                | Section::MiddleRight
                | Section::BottomMiddle
        )
    }

    /// The dragged corner for the four resize cells.
    pub fn corner(self) -> Option<Corner> {
        match self {
            Section::TopLeft => Some(Corner::TOP_LEFT),
            Section::TopRight => Some(Corner::TOP_RIGHT),
            Section::BottomLeft => Some(Corner::BOTTOM_LEFT),
            Section::BottomRight => Some(Corner::BOTTOM_RIGHT),
            _ => None,
        }
    }
}

/// Phase of a host gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GesturePhase {
    Begin,
    Move,
    End,
}

/// A gesture event as delivered by the host input source.
///
/// `local_x/local_y` are relative to the crop frame's top-left and only
/// matter on `Begin`. Translations are cumulative since `Begin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureEvent {
    pub phase: GesturePhase,
    #[serde(default)]
    pub local_x: f64,
    #[serde(default)]
    pub local_y: f64,
    #[serde(default)]
    pub translation_x: f64,
    #[serde(default)]
    pub translation_y: f64,
}

impl GestureEvent {
    pub fn begin(local_x: f64, local_y: f64) -> Self {
        Self {
            phase: GesturePhase::Begin,
            local_x,
            local_y,
            translation_x: 0.0,
            translation_y: 0.0,
        }
    }

    pub fn moved(translation_x: f64, translation_y: f64) -> Self {
        Self {
            phase: GesturePhase::Move,
            local_x: 0.0,
            local_y: 0.0,
            translation_x,
            translation_y,
        }
    }

    pub fn end(translation_x: f64, translation_y: f64) -> Self {
        Self {
            phase: GesturePhase::End,
            ..Self::moved(translation_x, translation_y)
        }
    }
}

/// Renderer-facing, uncommitted effect of the gesture so far.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Preview {
    /// Nothing moved yet.
    #[default]
    None,
    /// Raw translation of a pan gesture.
    Pan(Point),
    /// Signed growth of a resize gesture on the given corner.
    Resize { growth: Point, corner: Corner },
}

impl Preview {
    /// Apply the preview to a committed rectangle for live rendering.
    ///
    /// Nothing is clamped: the renderer sees exactly where the finger is.
    pub fn apply_to(&self, committed: CropRect) -> CropRect {
        match *self {
            Preview::None => committed,
            Preview::Pan(delta) => Rect::new(
                committed.x + delta.x,
                committed.y + delta.y,
                committed.width,
                committed.height,
            ),
            Preview::Resize { growth, corner } => Rect::new(
                if corner.is_left { committed.x - growth.x } else { committed.x },
                if corner.is_top { committed.y - growth.y } else { committed.y },
                committed.width + growth.x,
                committed.height + growth.y,
            ),
        }
    }
}

/// Transient state of one gesture, alive between begin and end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub section: Section,
    pub preview: Preview,
}

/// What a finished gesture committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureCommit {
    Pan { delta_x: f64, delta_y: f64 },
    Resize { delta_x: f64, delta_y: f64, corner: Corner },
}

/// `Idle → Tracking(section) → Idle` state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureArbiter {
    #[default]
    Idle,
    Tracking(GestureSession),
}

impl GestureArbiter {
    pub fn new() -> Self {
        Self::Idle
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, GestureArbiter::Tracking(_))
    }

    pub fn session(&self) -> Option<&GestureSession> {
        match self {
            GestureArbiter::Idle => None,
            GestureArbiter::Tracking(session) => Some(session),
        }
    }

    /// The live preview, or `Preview::None` when idle.
    pub fn preview(&self) -> Preview {
        self.session().map(|s| s.preview).unwrap_or_default()
    }

    /// Start a session at a frame-normalized point.
    ///
    /// A begin while already tracking is ignored: the section is frozen
    /// until the session ends.
    pub fn begin(&mut self, px: f64, py: f64) -> Option<Section> {
        if self.is_tracking() {
            debug!("ignored gesture begin while a gesture is active");
            return None;
        }

        let section = Section::classify(px, py);
        trace!(section = section.name(), "gesture began");
        *self = GestureArbiter::Tracking(GestureSession {
            section,
            preview: Preview::None,
        });
        Some(section)
    }

    /// Update the preview from the cumulative translation. Ignored when idle.
    pub fn update(&mut self, translation_x: f64, translation_y: f64, config: &EditorConfig) -> Preview {
        let GestureArbiter::Tracking(session) = self else {
            return Preview::None;
        };

        session.preview = match session.section.corner() {
            None => Preview::Pan(Point::new(translation_x, translation_y)),
            Some(corner) => Preview::Resize {
                growth: resize_growth(translation_x, translation_y, corner, config),
                corner,
            },
        };
        session.preview
    }

    /// End the session, committing the final translation to `frame`.
    ///
    /// Returns the committed frame and what was committed, or `None` when no
    /// session was active. The arbiter is idle afterwards in every case.
    pub fn end(
        &mut self,
        translation_x: f64,
        translation_y: f64,
        frame: &CropFrameController,
    ) -> Option<(CropFrameController, GestureCommit)> {
        let GestureArbiter::Tracking(session) = std::mem::take(self) else {
            return None;
        };

        let commit = match session.section.corner() {
            None => GestureCommit::Pan {
                delta_x: translation_x,
                delta_y: translation_y,
            },
            Some(corner) => GestureCommit::Resize {
                delta_x: translation_x,
                delta_y: translation_y,
                corner,
            },
        };

        let next = match commit {
            GestureCommit::Pan { delta_x, delta_y } => frame.pan(delta_x, delta_y),
            GestureCommit::Resize {
                delta_x,
                delta_y,
                corner,
            } => frame.resize(delta_x, delta_y, corner),
        };
        Some((next, commit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> CropFrameController {
        CropFrameController::from_parts(
            EditorConfig::new(),
            Rect::new(0.0, 0.0, 300.0, 300.0),
            Rect::new(100.0, 100.0, 90.0, 90.0),
        )
    }

    #[test]
    fn test_classify_grid() {
        assert_eq!(Section::classify(0.1, 0.1), Section::TopLeft);
        assert_eq!(Section::classify(0.5, 0.1), Section::TopMiddle);
        assert_eq!(Section::classify(0.9, 0.1), Section::TopRight);
        assert_eq!(Section::classify(0.1, 0.5), Section::MiddleLeft);
        assert_eq!(Section::classify(0.5, 0.5), Section::MiddleMiddle);
        assert_eq!(Section::classify(0.9, 0.5), Section::MiddleRight);
        assert_eq!(Section::classify(0.1, 0.9), Section::BottomLeft);
        assert_eq!(Section::classify(0.5, 0.9), Section::BottomMiddle);
        assert_eq!(Section::classify(0.9, 0.9), Section::BottomRight);
    }

    #[test]
    fn test_classify_boundaries() {
        // Thirds are half-open: exactly 1/3 is already the middle
        assert_eq!(Section::classify(1.0 / 3.0, 0.0), Section::TopMiddle);
        assert_eq!(Section::classify(2.0 / 3.0, 0.0), Section::TopRight);
        assert_eq!(Section::classify(0.0, 2.0 / 3.0), Section::BottomLeft);
        // Outside the frame falls into the nearest outer cell
        assert_eq!(Section::classify(-0.5, 1.5), Section::BottomLeft);
    }

    #[test]
    fn test_section_names() {
        assert_eq!(Section::TopLeft.name(), "topleft");
        assert_eq!(Section::MiddleMiddle.name(), "middlemiddle");
        assert_eq!(Section::BottomRight.name(), "bottomright");
    }

    #[test]
    fn test_cross_sections_pan() {
        let pans: Vec<_> = GRID.iter().flatten().filter(|s| s.is_pan()).copied().collect();
        assert_eq!(
            pans,
            vec![
                Section::TopMiddle,
                Section::MiddleLeft,
                Section::MiddleMiddle,
                Section::MiddleRight,
                Section::BottomMiddle,
            ]
        );
        for section in pans {
            assert_eq!(section.corner(), None);
        }
    }

    #[test]
    fn test_corner_sections_resize() {
        assert_eq!(Section::TopLeft.corner(), Some(Corner::new(true, true)));
        assert_eq!(Section::TopRight.corner(), Some(Corner::new(false, true)));
        assert_eq!(Section::BottomLeft.corner(), Some(Corner::new(true, false)));
        assert_eq!(Section::BottomRight.corner(), Some(Corner::new(false, false)));
    }

    #[test]
    fn test_pan_session_previews_raw_translation() {
        let mut arbiter = GestureArbiter::new();
        arbiter.begin(0.5, 0.5);

        let preview = arbiter.update(-500.0, 20.0, &EditorConfig::new());
        assert_eq!(preview, Preview::Pan(Point::new(-500.0, 20.0)));
        // Unclamped: the preview may leave the bounds
        assert_eq!(
            preview.apply_to(frame().crop_rect()),
            Rect::new(-400.0, 120.0, 90.0, 90.0)
        );
    }

    #[test]
    fn test_resize_preview_matches_commit() {
        let config = EditorConfig::locked(2.0);
        let committed = CropFrameController::from_parts(
            config,
            Rect::new(0.0, 0.0, 1000.0, 1000.0),
            Rect::new(200.0, 200.0, 100.0, 50.0),
        );
        let mut arbiter = GestureArbiter::new();
        arbiter.begin(0.9, 0.9);

        let preview = arbiter.update(20.0, 5.0, &config);
        let previewed = preview.apply_to(committed.crop_rect());

        let (next, _) = arbiter.end(20.0, 5.0, &committed).unwrap();
        assert_eq!(previewed, next.crop_rect());
        assert_eq!(previewed, Rect::new(200.0, 200.0, 110.0, 55.0));
    }

    #[test]
    fn test_top_left_resize_preview_moves_origin() {
        let mut arbiter = GestureArbiter::new();
        arbiter.begin(0.0, 0.0);
        let preview = arbiter.update(-10.0, -5.0, &EditorConfig::new());

        assert_eq!(
            preview.apply_to(Rect::new(100.0, 100.0, 90.0, 90.0)),
            Rect::new(90.0, 95.0, 100.0, 95.0)
        );
    }

    #[test]
    fn test_preview_does_not_touch_committed_state() {
        let committed = frame();
        let mut arbiter = GestureArbiter::new();
        arbiter.begin(0.5, 0.5);
        arbiter.update(40.0, 40.0, committed.config());

        assert_eq!(committed.crop_rect(), Rect::new(100.0, 100.0, 90.0, 90.0));
    }

    #[test]
    fn test_end_pan_commits_clamped() {
        let mut arbiter = GestureArbiter::new();
        arbiter.begin(0.5, 0.1);

        let (next, commit) = arbiter.end(1000.0, 0.0, &frame()).unwrap();
        assert_eq!(
            commit,
            GestureCommit::Pan {
                delta_x: 1000.0,
                delta_y: 0.0
            }
        );
        assert_eq!(next.accumulated_pan(), Point::new(210.0, 100.0));
        assert!(!arbiter.is_tracking());
    }

    #[test]
    fn test_end_resize_commits_with_corner() {
        let mut arbiter = GestureArbiter::new();
        arbiter.begin(0.1, 0.9);

        let (next, commit) = arbiter.end(-10.0, 10.0, &frame()).unwrap();
        assert_eq!(
            commit,
            GestureCommit::Resize {
                delta_x: -10.0,
                delta_y: 10.0,
                corner: Corner::BOTTOM_LEFT
            }
        );
        assert_eq!(next.crop_rect(), Rect::new(90.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn test_zero_translation_end_is_noop_commit() {
        let mut arbiter = GestureArbiter::new();
        arbiter.begin(0.9, 0.1);
        arbiter.update(30.0, 30.0, &EditorConfig::new());

        let (next, _) = arbiter.end(0.0, 0.0, &frame()).unwrap();
        assert_eq!(next, frame());
        assert_eq!(arbiter.preview(), Preview::None);
    }

    #[test]
    fn test_section_frozen_for_session() {
        let mut arbiter = GestureArbiter::new();
        assert_eq!(arbiter.begin(0.1, 0.1), Some(Section::TopLeft));
        assert_eq!(arbiter.begin(0.5, 0.5), None);
        assert_eq!(arbiter.session().unwrap().section, Section::TopLeft);
    }

    #[test]
    fn test_events_without_session_are_ignored() {
        let mut arbiter = GestureArbiter::new();
        assert_eq!(arbiter.update(5.0, 5.0, &EditorConfig::new()), Preview::None);
        assert!(arbiter.end(5.0, 5.0, &frame()).is_none());
        assert!(!arbiter.is_tracking());
    }
}
