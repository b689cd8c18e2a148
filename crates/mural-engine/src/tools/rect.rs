//! Rectangle tool: outlines the rect spanned by the anchor and the current
//! pick, re-previewed on every drag like the line tool.

use mural_core::geom::Line3;
use mural_core::raster::outline_rect;
use mural_core::trace::{trace_rect, StrokeSample};

use super::stamp_at;
use crate::engine::PaintEngine;
use crate::session::{Session, StrokeState};

pub(crate) fn press(engine: &mut PaintEngine, session: &mut Session, eye: &Line3) {
    let Some((hit, frame)) = engine.pick(eye, false) else {
        return;
    };
    stamp_at(engine, &frame, session.author, hit.pixel, session.brush);
    let sample = StrokeSample {
        frame: hit.frame,
        world: hit.world,
        eye: eye.origin,
    };
    let mut stroke = StrokeState {
        anchor: Some(sample),
        last: Some(sample),
        ..Default::default()
    };
    stroke.touch(hit.frame);
    session.stroke = Some(stroke);
}

pub(crate) fn drag(engine: &mut PaintEngine, session: &mut Session, eye: &Line3) {
    let Some(anchor) = session.stroke.as_ref().and_then(|s| s.anchor) else {
        return;
    };
    engine.discard_preview(session);
    let Some((hit, _)) = engine.pick(eye, true) else {
        return;
    };
    let current = StrokeSample {
        frame: hit.frame,
        world: hit.world,
        eye: eye.origin,
    };

    let candidates = engine.segment_candidates(anchor.world, current.world);
    let spans = trace_rect(&anchor, &current, &candidates);
    let brush = session.brush;
    let author = session.author;
    let mut drawn = Vec::with_capacity(spans.len());
    for span in spans {
        let Some(frame) = candidates.iter().find(|f| f.id == span.frame) else {
            continue;
        };
        let state = engine.ensure_canvas(frame);
        let overlay = state.layers.overlay(author);
        outline_rect(overlay, span.min, span.max, brush.thickness, brush.color);
        drawn.push(span.frame);
    }
    if let Some(stroke) = session.stroke.as_mut() {
        for frame in drawn {
            stroke.touch(frame);
        }
        stroke.last = Some(current);
    }
}

pub(crate) fn release(engine: &mut PaintEngine, session: &mut Session, eye: &Line3) {
    drag(engine, session, eye);
    engine.commit_stroke(session);
}
