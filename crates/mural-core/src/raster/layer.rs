//! Per-author overlay layers over a shared base buffer.

use std::collections::HashMap;
use std::hash::Hash;

use super::{DirtyRect, PixelImage, CLEAR};

/// A canvas base buffer plus isolated per-author overlay layers.
///
/// The base is the only persisted state. Overlays exist for the duration of
/// one in-progress stroke, are exclusively owned by their author, and are
/// merged ([`Self::apply`]) or dropped ([`Self::discard`]) exactly once.
#[derive(Debug, Clone)]
pub struct LayeredCanvas<K> {
    base: PixelImage,
    overlays: HashMap<K, PixelImage>,
}

impl<K: Eq + Hash + Copy> LayeredCanvas<K> {
    pub fn new(base: PixelImage) -> Self {
        Self {
            base,
            overlays: HashMap::new(),
        }
    }

    pub fn base(&self) -> &PixelImage {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut PixelImage {
        &mut self.base
    }

    /// The author's overlay, lazily created filled with the sentinel.
    pub fn overlay(&mut self, key: K) -> &mut PixelImage {
        let (width, height) = (self.base.width(), self.base.height());
        self.overlays
            .entry(key)
            .or_insert_with(|| PixelImage::new(width, height))
    }

    pub fn overlay_ref(&self, key: K) -> Option<&PixelImage> {
        self.overlays.get(&key)
    }

    /// Split borrow of the base and one author's overlay (lazily created),
    /// for fills that read the committed picture while writing the overlay.
    pub fn base_and_overlay(&mut self, key: K) -> (&PixelImage, &mut PixelImage) {
        let (width, height) = (self.base.width(), self.base.height());
        let overlay = self
            .overlays
            .entry(key)
            .or_insert_with(|| PixelImage::new(width, height));
        (&self.base, overlay)
    }

    pub fn has_overlay(&self, key: K) -> bool {
        self.overlays.contains_key(&key)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Compose base and overlays into `out`: base pixels, then every active
    /// overlay on top with sentinel pixels skipped. Only touched overlay
    /// regions are revisited.
    pub fn compose(&self, out: &mut PixelImage) {
        out.copy_from(&self.base);
        for overlay in self.overlays.values() {
            let Some(rect) = overlay.touched() else {
                continue;
            };
            for y in rect.y0..=rect.y1 {
                for x in rect.x0..=rect.x1 {
                    match overlay.get(x, y) {
                        Some(v) if v != CLEAR => out.set(x, y, v),
                        _ => {}
                    }
                }
            }
        }
    }

    /// Merge the author's overlay into the base (sentinel pixels skipped),
    /// marking the merged region dirty on the base, and drop the overlay.
    /// Returns the merged region, `None` when the overlay was missing or
    /// never drawn on.
    pub fn apply(&mut self, key: K) -> Option<DirtyRect> {
        let overlay = self.overlays.remove(&key)?;
        let rect = overlay.touched()?;
        for y in rect.y0..=rect.y1 {
            for x in rect.x0..=rect.x1 {
                match overlay.get(x, y) {
                    Some(v) if v != CLEAR => self.base.set(x, y, v),
                    _ => {}
                }
            }
        }
        Some(rect)
    }

    /// Drop the author's overlay without merging — the cancellation
    /// primitive. The overlay's touched region is marked dirty on the base
    /// so observers get the reverted pixels re-sent. Returns that region.
    pub fn discard(&mut self, key: K) -> Option<DirtyRect> {
        let overlay = self.overlays.remove(&key)?;
        let rect = overlay.touched()?;
        self.base.mark_region_dirty(rect);
        Some(rect)
    }

    /// Union of every consumable dirty region across base and overlays,
    /// consuming them. This is the region remote observers need re-sent.
    pub fn take_sync_region(&mut self) -> Option<DirtyRect> {
        let mut region = self.base.take_dirty();
        for overlay in self.overlays.values_mut() {
            if let Some(rect) = overlay.take_dirty() {
                region = Some(match region {
                    Some(r) => r.union(rect),
                    None => rect,
                });
            }
        }
        region
    }
}
