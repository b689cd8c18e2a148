//! Ray and segment tracing against mounted canvases.
//!
//! Candidate frames come from the host's spatial query; the tracers only
//! see an enumerable candidate list and return pixel-space results. A trace
//! that resolves nothing is a normal outcome, not an error.

mod point;
mod rect;
mod segment;

pub use point::{pick_canvas, PickOptions, PointHit};
pub use rect::{trace_rect, RectSpan};
pub use segment::{trace_segment, SegmentSpan, StrokeSample};

/// Maximum author reach when picking a canvas, in world units.
pub const MAX_REACH: f64 = 8.0;

/// Extra pick margin beyond reach.
pub const REACH_MARGIN: f64 = 1.0;
