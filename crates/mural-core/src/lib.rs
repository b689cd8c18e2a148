//! Mural Core Library
//!
//! Geometry kernel, frame poses, canvas tracing and the layered raster +
//! undo engine for raster canvases mounted as oriented quads in a 3D world.

pub mod frame;
pub mod geom;
pub mod history;
pub mod raster;
pub mod trace;

pub use frame::{CanvasFrame, FrameId, FramePose, FrameRotation};
pub use geom::{Line3, Plane};
pub use history::{MementoEntry, StrokeHistory, StrokeMemento, HISTORY_CAPACITY};
pub use raster::{DirtyRect, LayeredCanvas, PixelImage, BACKGROUND, CLEAR};
pub use trace::{
    pick_canvas, trace_rect, trace_segment, PickOptions, PointHit, RectSpan, SegmentSpan,
    StrokeSample, MAX_REACH, REACH_MARGIN,
};

use uuid::Uuid;

/// Identity of one drawing author.
pub type AuthorId = Uuid;
