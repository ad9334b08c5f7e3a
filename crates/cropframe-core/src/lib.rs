//! Cropframe Core - Interactive crop geometry
//!
//! This crate provides the geometry behind an interactive crop tool: fitting
//! an image into a viewport, keeping a crop frame inside the image under
//! pan and resize gestures, and converting the frame into source pixels for
//! the service that performs the actual crop.
//!
//! # Module Structure
//!
//! - `mapper` - Fit an image into a viewport, derive the scale factor
//! - `frame` - Committed crop frame with bounds, minimum and aspect constraints
//! - `gesture` - Nine-cell gesture arbitration and live preview
//! - `engine` - Composes the above for one session
//! - `editor` - Editing modes and committing edits through an image processor
//! - `processor` - Image processor boundary and an in-memory implementation
//!
//! Everything except the image processor is synchronous and single-threaded;
//! the host delivers events one at a time.

pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod mapper;
pub mod processor;

pub use config::{EditorConfig, EditorMode};
pub use editor::{EditingMode, Editor, PendingEdit, RotationDirection};
pub use engine::CropEngine;
pub use error::{ConfigError, EditorError, ProcessingError};
pub use frame::{Corner, CropFrameController};
pub use geometry::{CropRect, ImageBounds, ImageMeta, Point, Rect, Size, SourceCropRegion, ViewportLayout};
pub use gesture::{GestureArbiter, GestureEvent, GesturePhase, Preview, Section};
pub use mapper::{compute_bounds, FittedImage};
pub use processor::{BufferProcessor, EditOp, ImageProcessor, RgbBuffer};
