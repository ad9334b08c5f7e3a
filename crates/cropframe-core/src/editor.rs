//! Editing session: modes, the processing flag and committing edits.
//!
//! The [`Editor`] wraps a [`CropEngine`] and drives the external
//! [`ImageProcessor`]. Edits are committed in two phases so the host can run
//! the processor asynchronously:
//!
//! 1. `begin_*` computes the request and raises the processing flag
//! 2. the host runs the request
//! 3. [`Editor::finish_edit`] lowers the flag and applies the result
//!
//! A failed request leaves all crop geometry untouched, so the user can
//! simply try again.

use crate::config::{EditorConfig, EditorMode};
use crate::engine::CropEngine;
use crate::error::{ConfigError, EditorError, ProcessingError};
use crate::geometry::{ImageMeta, ViewportLayout};
use crate::processor::{EditOp, ImageProcessor};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Pixels trimmed from every edge after a rotation.
pub const ROTATION_BORDER_TRIM: u32 = 1;

/// The operation currently being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditingMode {
    /// Choosing an operation.
    #[default]
    #[serde(rename = "operation-select")]
    Select,
    Crop,
    Rotate,
    Blur,
}

/// Direction of a quarter-turn rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    #[serde(rename = "cw")]
    Clockwise,
    #[serde(rename = "ccw")]
    CounterClockwise,
}

/// Step a cumulative rotation by one quarter turn.
///
/// The angle stays within `[-180, 180]`: stepping past 180 wraps to -90 and
/// past -180 wraps to 90.
pub fn next_rotation(current: i32, direction: RotationDirection) -> i32 {
    let next = match direction {
        RotationDirection::Clockwise => current + 90,
        RotationDirection::CounterClockwise => current - 90,
    };

    if next > 180 {
        -90
    } else if next < -180 {
        90
    } else {
        next
    }
}

/// What a pending edit will do once its result arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Crop,
    Rotate { angle: i32 },
}

/// A request handed to the image processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub kind: EditKind,
    pub source: ImageMeta,
    pub ops: Vec<EditOp>,
}

/// Rotation state, kept while the rotate mode is active.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RotationSession {
    /// Image as it was when rotation started; every angle is applied to it.
    original: ImageMeta,
    angle: i32,
}

/// One editing session over a single image.
#[derive(Debug, Clone)]
pub struct Editor {
    engine: CropEngine,
    mode: EditingMode,
    is_processing: bool,
    rotation: Option<RotationSession>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        let engine = CropEngine::new(config)?;
        let mode = match config.mode {
            EditorMode::Full => EditingMode::Select,
            EditorMode::CropOnly => EditingMode::Crop,
        };
        Ok(Self {
            engine,
            mode,
            is_processing: false,
            rotation: None,
        })
    }

    pub fn engine(&self) -> &CropEngine {
        &self.engine
    }

    /// Mutable access for gesture handling.
    pub fn engine_mut(&mut self) -> &mut CropEngine {
        &mut self.engine
    }

    pub fn mode(&self) -> EditingMode {
        self.mode
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// Cumulative angle of the active rotation session, if any.
    pub fn rotation(&self) -> Option<i32> {
        self.rotation.as_ref().map(|r| r.angle)
    }

    pub fn set_viewport(&mut self, viewport: ViewportLayout) {
        self.engine.set_viewport(viewport);
    }

    /// Load the image to edit.
    pub fn load_image(&mut self, image: ImageMeta) {
        self.engine.set_image(image);
    }

    fn mode_after_edit(&self) -> EditingMode {
        match self.engine.config().mode {
            EditorMode::Full => EditingMode::Select,
            EditorMode::CropOnly => EditingMode::Crop,
        }
    }

    fn ensure_idle(&self) -> Result<(), EditorError> {
        if self.is_processing {
            Err(EditorError::Busy)
        } else {
            Ok(())
        }
    }

    /// Switch the active operation.
    ///
    /// Entering rotate captures the current image as the rotation original.
    /// Leaving rotate keeps the rotated image and ends the rotation session.
    pub fn set_mode(&mut self, mode: EditingMode) -> Result<(), EditorError> {
        self.ensure_idle()?;

        if mode != EditingMode::Rotate {
            self.rotation = None;
        } else if self.rotation.is_none() {
            let original = self.engine.image().cloned().ok_or(EditorError::NoImage)?;
            self.rotation = Some(RotationSession { original, angle: 0 });
        }

        debug!(from = ?self.mode, to = ?mode, "editing mode changed");
        self.mode = mode;
        Ok(())
    }

    /// Leave the current operation, discarding it.
    ///
    /// Cancelling a rotation restores the image it started from.
    pub fn cancel(&mut self) -> Result<(), EditorError> {
        self.ensure_idle()?;

        if let Some(session) = self.rotation.take() {
            if self.mode == EditingMode::Rotate && session.angle != 0 {
                self.engine.set_image(session.original);
            }
        }
        self.mode = self.mode_after_edit();
        Ok(())
    }

    /// Keep the rotated image and return to operation select.
    pub fn finish_rotation(&mut self) -> Result<(), EditorError> {
        self.ensure_idle()?;
        self.rotation = None;
        self.mode = self.mode_after_edit();
        Ok(())
    }

    /// Start committing the current crop frame.
    pub fn begin_crop(&mut self) -> Result<PendingEdit, EditorError> {
        self.ensure_idle()?;
        let source = self.engine.image().cloned().ok_or(EditorError::NoImage)?;
        let region = self
            .engine
            .compute_source_crop_region()
            .ok_or(EditorError::NotReady)?;
        debug!(?region, "crop requested");
        self.is_processing = true;
        Ok(PendingEdit {
            kind: EditKind::Crop,
            source,
            ops: vec![EditOp::Crop(region)],
        })
    }

    /// Start a quarter-turn rotation step.
    ///
    /// Returns `None` when the step lands back on 0 degrees: the original
    /// image is restored directly and nothing needs processing.
    pub fn begin_rotate(
        &mut self,
        direction: RotationDirection,
    ) -> Result<Option<PendingEdit>, EditorError> {
        self.ensure_idle()?;
        if self.rotation.is_none() {
            self.set_mode(EditingMode::Rotate)?;
        }
        let Some(session) = self.rotation.as_mut() else {
            return Err(EditorError::NoImage);
        };

        let angle = next_rotation(session.angle, direction);
        if angle == 0 {
            session.angle = 0;
            let original = session.original.clone();
            self.engine.set_image(original);
            return Ok(None);
        }

        let source = session.original.clone();
        self.is_processing = true;
        Ok(Some(PendingEdit {
            kind: EditKind::Rotate { angle },
            source,
            ops: vec![EditOp::Rotate(angle), EditOp::TrimBorder(ROTATION_BORDER_TRIM)],
        }))
    }

    /// Apply the processor's answer to a pending edit.
    ///
    /// Always lowers the processing flag. On failure nothing else changes and
    /// the error is returned for the host to report.
    pub fn finish_edit(
        &mut self,
        pending: PendingEdit,
        result: Result<ImageMeta, ProcessingError>,
    ) -> Result<(), EditorError> {
        self.is_processing = false;

        let image = match result {
            Ok(image) => image,
            Err(e) => {
                warn!(kind = ?pending.kind, error = %e, "edit failed");
                return Err(EditorError::OperationFailed(e));
            }
        };

        self.engine.set_image(image);
        match pending.kind {
            EditKind::Crop => self.mode = self.mode_after_edit(),
            EditKind::Rotate { angle } => {
                if let Some(session) = self.rotation.as_mut() {
                    session.angle = angle;
                }
            }
        }
        Ok(())
    }

    /// Crop synchronously with `processor`.
    pub fn perform_crop<P: ImageProcessor>(&mut self, processor: &mut P) -> Result<(), EditorError> {
        let pending = self.begin_crop()?;
        let result = processor.apply(&pending.source, &pending.ops);
        self.finish_edit(pending, result)
    }

    /// Rotate one step synchronously with `processor`.
    pub fn perform_rotate<P: ImageProcessor>(
        &mut self,
        direction: RotationDirection,
        processor: &mut P,
    ) -> Result<(), EditorError> {
        match self.begin_rotate(direction)? {
            Some(pending) => {
                let result = processor.apply(&pending.source, &pending.ops);
                self.finish_edit(pending, result)
            }
            None => Ok(()),
        }
    }
}
