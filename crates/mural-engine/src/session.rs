//! Per-author painting sessions.
//!
//! Sessions live in a concurrent map so listener threads can read them
//! before hand-off; all mutation happens on the simulation thread.

use mural_core::history::StrokeHistory;
use mural_core::frame::FrameId;
use mural_core::trace::StrokeSample;
use mural_core::AuthorId;
use serde::{Deserialize, Serialize};

use crate::tools::ToolKind;

/// Brush configuration: an opaque palette byte and a thickness in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brush {
    pub color: u8,
    pub thickness: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: 34,
            thickness: 1,
        }
    }
}

/// Bookkeeping for one in-progress stroke.
#[derive(Debug, Clone, Default)]
pub struct StrokeState {
    /// Pick at the press that started the stroke; line/rect tools re-trace
    /// from here on every drag.
    pub anchor: Option<StrokeSample>,
    /// Most recent sample, chained by the pencil.
    pub last: Option<StrokeSample>,
    /// Canvases holding overlay content for this stroke.
    pub touched: Vec<FrameId>,
}

impl StrokeState {
    /// Record that this stroke drew on a canvas.
    pub fn touch(&mut self, frame: FrameId) {
        if !self.touched.contains(&frame) {
            self.touched.push(frame);
        }
    }
}

/// One author's editing session.
#[derive(Debug)]
pub struct Session {
    pub author: AuthorId,
    pub tool: ToolKind,
    pub brush: Brush,
    /// `Some` while a stroke is between press and release/cancel.
    pub stroke: Option<StrokeState>,
    pub history: StrokeHistory,
}

impl Session {
    pub fn new(author: AuthorId) -> Self {
        Self {
            author,
            tool: ToolKind::default(),
            brush: Brush::default(),
            stroke: None,
            history: StrokeHistory::new(),
        }
    }

    pub fn is_painting(&self) -> bool {
        self.stroke.is_some()
    }
}
