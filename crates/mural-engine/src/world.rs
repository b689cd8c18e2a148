//! Collaborator traits implemented by the host world.
//!
//! The engine never reaches into host internals; everything it needs from
//! the outside is one of these narrow interfaces.

use glam::DVec3;
use mural_core::frame::{CanvasFrame, FrameId};
use mural_core::geom::Line3;
use mural_core::raster::DirtyRect;
use thiserror::Error;

/// Errors from the canvas byte store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("canvas not found: {0}")]
    NotFound(FrameId),
    #[error("io error: {0}")]
    Io(String),
    #[error("store error: {0}")]
    Other(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Spatial lookup of mounted frames.
///
/// Implementations return fresh pose snapshots per query; the engine never
/// caches them across ticks.
pub trait FrameIndex: Send + Sync {
    /// Candidate frames within `radius` of `point`.
    fn frames_near(&self, point: DVec3, radius: f64) -> Vec<CanvasFrame>;

    /// Candidate frames intersecting the axis-aligned box spanned by
    /// `min`/`max`, expanded by `margin` on every side.
    fn frames_in_box(&self, min: DVec3, max: DVec3, margin: f64) -> Vec<CanvasFrame>;
}

/// Distance to the first opaque obstruction along an eye ray, if any.
pub trait Occlusion: Send + Sync {
    fn first_obstruction(&self, eye: &Line3, max_distance: f64) -> Option<f64>;
}

/// Host-owned persistence for canvas base buffers.
pub trait CanvasStore: Send + Sync {
    /// Current bytes of a canvas, row-major.
    fn read(&self, frame: FrameId) -> StoreResult<Vec<u8>>;

    /// Replace the stored bytes of a canvas.
    fn write(&self, frame: FrameId, bytes: &[u8]) -> StoreResult<()>;

    /// Mark a region as needing flush.
    fn mark_dirty(&self, frame: FrameId, region: DirtyRect);
}

/// Push composed sub-image updates to remote observers.
pub trait SyncSink: Send + Sync {
    /// `bytes` are the row-major pixels of `region` on the composed canvas.
    fn push_region(&self, frame: FrameId, region: DirtyRect, bytes: &[u8]);
}
