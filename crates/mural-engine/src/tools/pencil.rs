//! Freehand pencil: every drag sample extends the stroke through the
//! segment tracer, so one continuous motion crosses canvas boundaries.

use mural_core::geom::Line3;
use mural_core::trace::StrokeSample;

use super::{draw_traced_segment, stamp_at};
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
    let Some(prev) = session.stroke.as_ref().and_then(|s| s.last) else {
        return;
    };
    // Near-misses keep the chain alive while the look wanders off an edge.
    let Some((hit, _)) = engine.pick(eye, true) else {
        return;
    };
    let current = StrokeSample {
        frame: hit.frame,
        world: hit.world,
        eye: eye.origin,
    };
    let drawn = draw_traced_segment(engine, session.author, session.brush, &prev, &current);
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
