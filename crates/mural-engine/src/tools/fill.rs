//! Paint-bucket fill: floods the contiguous same-colored region of the
//! committed picture under the pick and commits immediately.

use mural_core::geom::Line3;
use mural_core::raster::flood_fill;

use crate::engine::PaintEngine;
use crate::session::{Session, StrokeState};

pub(crate) fn press(engine: &mut PaintEngine, session: &mut Session, eye: &Line3) {
    let Some((hit, frame)) = engine.pick(eye, false) else {
        return;
    };
    let author = session.author;
    let color = session.brush.color;

    let state = engine.ensure_canvas(&frame);
    let x = hit.pixel.x.floor() as i32;
    let y = hit.pixel.y.floor() as i32;
    let filled = {
        let (base, overlay) = state.layers.base_and_overlay(author);
        flood_fill(base, overlay, x, y, color).is_some()
    };
    if !filled {
        state.layers.discard(author);
        return;
    }

    let mut stroke = StrokeState::default();
    stroke.touch(hit.frame);
    session.stroke = Some(stroke);
    engine.commit_stroke(session);
}
