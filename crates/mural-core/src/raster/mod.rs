//! Layered pixel rasters with dirty-region tracking.

mod dirty;
mod draw;
mod layer;

pub use dirty::{DirtyRect, DirtyTracker};
pub use draw::{draw_line, flood_fill, outline_rect, stamp_disc};
pub use layer::LayeredCanvas;

/// Reserved sentinel byte: "unchanged/transparent". Never an opaque drawn
/// color; base buffers hold opaque palette bytes, the sentinel appears only
/// in overlays and undo snapshots.
pub const CLEAR: u8 = 0;

/// Default opaque background byte for freshly created canvases.
pub const BACKGROUND: u8 = 255;

/// A width × height byte buffer with dirty-region tracking.
///
/// Two regions are grown by every value-changing write: `dirty` is
/// consumable and drives flush/sync work; `touched` is the lifetime extent
/// of the buffer's edits and drives overlay masking and merge.
#[derive(Debug, Clone)]
pub struct PixelImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
    dirty: DirtyTracker,
    touched: DirtyTracker,
}

impl PixelImage {
    /// A buffer filled with the [`CLEAR`] sentinel.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, CLEAR)
    }

    /// A buffer filled with one byte value.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
            dirty: DirtyTracker::new(),
            touched: DirtyTracker::new(),
        }
    }

    /// Wrap existing row-major bytes.
    ///
    /// Panics when `bytes` does not match the dimensions; a mismatched
    /// buffer is a broken caller invariant.
    pub fn from_bytes(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        assert_eq!(
            bytes.len(),
            width as usize * height as usize,
            "pixel buffer does not match {width}x{height}"
        );
        Self {
            width,
            height,
            data: bytes,
            dirty: DirtyTracker::new(),
            touched: DirtyTracker::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Bounds-checked read; `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Bounds-checked write; silently ignored outside the buffer. Only a
    /// value-changing write grows the dirty regions.
    pub fn set(&mut self, x: i32, y: i32, value: u8) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if self.data[i] == value {
            return;
        }
        self.data[i] = value;
        self.dirty.mark(x, y);
        self.touched.mark(x, y);
    }

    /// Fill the whole buffer with one value.
    pub fn fill(&mut self, value: u8) {
        if self.data.iter().all(|&b| b == value) {
            return;
        }
        self.data.fill(value);
        let full = DirtyRect::new(0, 0, self.width as i32 - 1, self.height as i32 - 1);
        self.dirty.mark_rect(full);
        self.touched.mark_rect(full);
    }

    /// Replace this buffer's pixels with another's, without dirty tracking.
    ///
    /// Panics on mismatched dimensions; canvases have a fixed resolution and
    /// a mismatch is a broken caller invariant.
    pub fn copy_from(&mut self, other: &PixelImage) {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "pixel buffer dimensions differ"
        );
        self.data.copy_from_slice(&other.data);
    }

    /// Row-major bytes of a sub-region, clamped to the buffer.
    pub fn sub_image(&self, region: DirtyRect) -> Vec<u8> {
        let Some(rect) = region.clamped(self.width, self.height) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(rect.width() as usize * rect.height() as usize);
        for y in rect.y0..=rect.y1 {
            let row = y as usize * self.width as usize;
            out.extend_from_slice(&self.data[row + rect.x0 as usize..=row + rect.x1 as usize]);
        }
        out
    }

    /// Grow the flush/sync region without changing pixels. Used when pixels
    /// *elsewhere* stopped contributing to the composed picture (an overlay
    /// was discarded) and observers need the region re-sent.
    pub fn mark_region_dirty(&mut self, rect: DirtyRect) {
        self.dirty.mark_rect(rect);
    }

    /// Consume the flush/sync region.
    pub fn take_dirty(&mut self) -> Option<DirtyRect> {
        self.dirty.take()
    }

    /// Flush/sync region without consuming it.
    pub fn peek_dirty(&self) -> Option<DirtyRect> {
        self.dirty.peek()
    }

    /// Lifetime extent of this buffer's edits.
    pub fn touched(&self) -> Option<DirtyRect> {
        self.touched.peek()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }
}
