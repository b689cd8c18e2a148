//! Stroke mementos and bounded undo history.

use std::collections::VecDeque;

use crate::frame::FrameId;
use crate::raster::{LayeredCanvas, PixelImage, CLEAR};
use crate::AuthorId;

/// Maximum number of undo mementos kept per author; the oldest is evicted
/// first.
pub const HISTORY_CAPACITY: usize = 10;

/// Pre-edit pixels of one canvas, masked to exactly the pixels one author's
/// stroke changed; sentinel everywhere else. Immutable once captured, so a
/// concurrent author's undo can never clobber pixels this stroke did not
/// touch.
#[derive(Debug, Clone)]
pub struct MementoEntry {
    author: AuthorId,
    frame: FrameId,
    snapshot: PixelImage,
}

impl MementoEntry {
    /// Capture the base pixels the author's overlay is about to replace.
    ///
    /// Must run before the overlay merges into the base. `None` when the
    /// author has no overlay on this canvas or never drew on it.
    pub fn capture(
        author: AuthorId,
        frame: FrameId,
        canvas: &LayeredCanvas<AuthorId>,
    ) -> Option<Self> {
        let overlay = canvas.overlay_ref(author)?;
        let rect = overlay.touched()?;
        let base = canvas.base();
        let mut snapshot = PixelImage::new(base.width(), base.height());
        for y in rect.y0..=rect.y1 {
            for x in rect.x0..=rect.x1 {
                match overlay.get(x, y) {
                    Some(v) if v != CLEAR => {
                        if let Some(prior) = base.get(x, y) {
                            snapshot.set(x, y, prior);
                        }
                    }
                    _ => {}
                }
            }
        }
        Some(Self {
            author,
            frame,
            snapshot,
        })
    }

    pub fn author(&self) -> AuthorId {
        self.author
    }

    pub fn frame(&self) -> FrameId {
        self.frame
    }

    /// Write the captured pixels back into a canvas base buffer.
    pub fn restore(&self, base: &mut PixelImage) {
        let Some(rect) = self.snapshot.touched() else {
            return;
        };
        for y in rect.y0..=rect.y1 {
            for x in rect.x0..=rect.x1 {
                match self.snapshot.get(x, y) {
                    Some(v) if v != CLEAR => base.set(x, y, v),
                    _ => {}
                }
            }
        }
    }
}

/// Everything needed to undo one stroke: one entry per canvas it touched.
#[derive(Debug, Clone, Default)]
pub struct StrokeMemento {
    entries: Vec<MementoEntry>,
}

impl StrokeMemento {
    pub fn new(entries: Vec<MementoEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MementoEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frames this stroke touched.
    pub fn frames(&self) -> impl Iterator<Item = FrameId> + '_ {
        self.entries.iter().map(|e| e.frame)
    }
}

/// Bounded stack of stroke mementos.
#[derive(Debug, Clone)]
pub struct StrokeHistory {
    stack: VecDeque<StrokeMemento>,
    capacity: usize,
}

impl Default for StrokeHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a memento, evicting the oldest beyond capacity. Empty mementos
    /// are dropped.
    pub fn push(&mut self, memento: StrokeMemento) {
        if memento.is_empty() {
            return;
        }
        if self.stack.len() == self.capacity {
            log::debug!("undo history full, evicting the oldest stroke");
            self.stack.pop_front();
        }
        self.stack.push_back(memento);
    }

    /// Pop the most recent memento.
    pub fn pop(&mut self) -> Option<StrokeMemento> {
        self.stack.pop_back()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
