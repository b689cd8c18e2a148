//! Paint tools: tracer + layer-engine orchestration per input event.
//!
//! Each tool follows the press/move/release lifecycle. All drawing goes
//! into the author's overlay layers; nothing reaches a canvas base until
//! the stroke commits, and a right press cancels the overlay instead.

pub(crate) mod fill;
pub(crate) mod line;
pub(crate) mod pencil;
pub(crate) mod rect;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use mural_core::frame::{CanvasFrame, FrameId};
use mural_core::raster::{draw_line, stamp_disc};
use mural_core::trace::{trace_segment, StrokeSample};
use mural_core::AuthorId;

use crate::engine::PaintEngine;
use crate::session::Brush;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pencil,
    Line,
    Rect,
    Fill,
}

/// Brush disc radius in pixels for a given thickness.
pub(crate) fn brush_radius(thickness: u32) -> i32 {
    (thickness.max(1) as i32 - 1) / 2
}

/// Stamp the brush dot at a pixel into the author's overlay.
pub(crate) fn stamp_at(
    engine: &mut PaintEngine,
    frame: &CanvasFrame,
    author: AuthorId,
    pixel: Point,
    brush: Brush,
) {
    let state = engine.ensure_canvas(frame);
    let overlay = state.layers.overlay(author);
    stamp_disc(
        overlay,
        pixel.x.floor() as i32,
        pixel.y.floor() as i32,
        brush_radius(brush.thickness),
        brush.color,
    );
}

/// Trace `prev` → `current` across nearby frames and draw every emitted
/// span into the author's overlays. Returns the frames drawn on.
pub(crate) fn draw_traced_segment(
    engine: &mut PaintEngine,
    author: AuthorId,
    brush: Brush,
    prev: &StrokeSample,
    current: &StrokeSample,
) -> Vec<FrameId> {
    let candidates = engine.segment_candidates(prev.world, current.world);
    let spans = trace_segment(prev, current, &candidates, brush.thickness);
    let mut drawn = Vec::with_capacity(spans.len());
    for span in spans {
        let Some(frame) = candidates.iter().find(|f| f.id == span.frame) else {
            continue;
        };
        let state = engine.ensure_canvas(frame);
        let overlay = state.layers.overlay(author);
        draw_line(overlay, span.from, span.to, brush.thickness, brush.color);
        drawn.push(span.frame);
    }
    drawn
}
