//! The paint engine: canvases, task dispatch and the sync flush.
//!
//! All trace/paint/composite logic runs on a single logical simulation
//! thread that drains the task queue via [`PaintEngine::pump`]. Listener
//! threads only read the session map and submit tasks through the handle.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use dashmap::DashMap;
use glam::DVec3;
use log::{debug, warn};

use mural_core::frame::{CanvasFrame, FrameId};
use mural_core::geom::Line3;
use mural_core::history::{MementoEntry, StrokeMemento};
use mural_core::raster::{LayeredCanvas, PixelImage, BACKGROUND, CLEAR};
use mural_core::trace::{pick_canvas, PickOptions, PointHit, MAX_REACH, REACH_MARGIN};
use mural_core::AuthorId;

use crate::queue::{sim_queue, InputAction, InputEvent, SimHandle, Task};
use crate::session::Session;
use crate::tools::{fill, line, pencil, rect, ToolKind};
use crate::world::{CanvasStore, FrameIndex, Occlusion, SyncSink};

/// Margin around a stroke's bounding volume when querying nearby frames.
const SEGMENT_MARGIN: f64 = 1.0;

/// One loaded canvas: resolution plus layered pixel state. The base buffer
/// is the only persisted state.
#[derive(Debug)]
pub struct CanvasState {
    pub resolution: u32,
    pub layers: LayeredCanvas<AuthorId>,
}

/// Owns canvases, sessions and the collaborator handles; drains the task
/// queue and flushes composed dirty regions to observers.
pub struct PaintEngine {
    canvases: HashMap<FrameId, CanvasState>,
    sessions: Arc<DashMap<AuthorId, Session>>,
    tasks: Receiver<Task>,
    handle: SimHandle,
    frames: Arc<dyn FrameIndex>,
    occlusion: Arc<dyn Occlusion>,
    store: Arc<dyn CanvasStore>,
    sync: Arc<dyn SyncSink>,
}

impl PaintEngine {
    pub fn new(
        frames: Arc<dyn FrameIndex>,
        occlusion: Arc<dyn Occlusion>,
        store: Arc<dyn CanvasStore>,
        sync: Arc<dyn SyncSink>,
    ) -> Self {
        let (handle, tasks) = sim_queue();
        Self {
            canvases: HashMap::new(),
            sessions: Arc::new(DashMap::new()),
            tasks,
            handle,
            frames,
            occlusion,
            store,
            sync,
        }
    }

    /// Submission handle for listener threads.
    pub fn handle(&self) -> SimHandle {
        self.handle.clone()
    }

    /// The shared session map; listener threads may read it, mutation stays
    /// on the simulation thread.
    pub fn sessions(&self) -> Arc<DashMap<AuthorId, Session>> {
        Arc::clone(&self.sessions)
    }

    pub fn canvas(&self, frame: FrameId) -> Option<&CanvasState> {
        self.canvases.get(&frame)
    }

    pub fn canvas_count(&self) -> usize {
        self.canvases.len()
    }

    /// Drain every pending task, then flush dirty regions to observers.
    /// Called once per simulation tick.
    pub fn pump(&mut self) {
        while let Ok(task) = self.tasks.try_recv() {
            self.process(task);
        }
        self.flush();
    }

    fn process(&mut self, task: Task) {
        match task {
            Task::Input(event) => self.handle_input(event),
            Task::Undo { author } => self.undo(author),
            Task::SetTool { author, tool } => {
                if let Some(mut session) = self.sessions.get_mut(&author) {
                    session.tool = tool;
                }
            }
            Task::SetBrush { author, brush } => {
                if brush.color == CLEAR {
                    warn!("rejecting brush with the transparent sentinel for {author}");
                    return;
                }
                if let Some(mut session) = self.sessions.get_mut(&author) {
                    session.brush = brush;
                }
            }
            Task::OpenSession { author } => {
                self.sessions.insert(author, Session::new(author));
                debug!("opened session for {author}");
            }
            Task::CloseSession { author } => self.close_session(author),
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        let sessions = Arc::clone(&self.sessions);
        let Some(mut guard) = sessions.get_mut(&event.author) else {
            debug!("input for unknown session {}", event.author);
            return;
        };
        let session = &mut *guard;
        match event.action {
            InputAction::PressLeft => match session.tool {
                ToolKind::Pencil => pencil::press(self, session, &event.eye),
                ToolKind::Line => line::press(self, session, &event.eye),
                ToolKind::Rect => rect::press(self, session, &event.eye),
                ToolKind::Fill => fill::press(self, session, &event.eye),
            },
            InputAction::Move => match session.tool {
                ToolKind::Pencil => pencil::drag(self, session, &event.eye),
                ToolKind::Line => line::drag(self, session, &event.eye),
                ToolKind::Rect => rect::drag(self, session, &event.eye),
                ToolKind::Fill => {}
            },
            InputAction::Release => match session.tool {
                ToolKind::Pencil => pencil::release(self, session, &event.eye),
                ToolKind::Line => line::release(self, session, &event.eye),
                ToolKind::Rect => rect::release(self, session, &event.eye),
                ToolKind::Fill => {}
            },
            InputAction::PressRight => self.cancel_stroke(session),
        }
    }

    fn close_session(&mut self, author: AuthorId) {
        let sessions = Arc::clone(&self.sessions);
        if let Some((_, mut session)) = sessions.remove(&author) {
            self.cancel_stroke(&mut session);
            debug!("closed session for {author}");
        }
    }

    /// Pick the canvas under the eye line. A strict in-bounds hit is
    /// preferred; only when none exists and `allow_near_miss` is set does
    /// an off-canvas hit on the nearest plane count.
    pub(crate) fn pick(&self, eye: &Line3, allow_near_miss: bool) -> Option<(PointHit, CanvasFrame)> {
        let max_distance = MAX_REACH + REACH_MARGIN;
        let candidates = self.frames.frames_near(eye.origin, max_distance);
        let obstruction = self.occlusion.first_obstruction(eye, max_distance);
        let strict = PickOptions {
            max_distance,
            obstruction,
            allow_near_miss: false,
        };
        let hit = pick_canvas(eye, &candidates, &strict).or_else(|| {
            allow_near_miss
                .then(|| {
                    pick_canvas(
                        eye,
                        &candidates,
                        &PickOptions {
                            allow_near_miss: true,
                            ..strict
                        },
                    )
                })
                .flatten()
        })?;
        let frame = candidates.into_iter().find(|f| f.id == hit.frame)?;
        Some((hit, frame))
    }

    /// Frames near the bounding volume of a stroke segment.
    pub(crate) fn segment_candidates(&self, a: DVec3, b: DVec3) -> Vec<CanvasFrame> {
        self.frames.frames_in_box(a.min(b), a.max(b), SEGMENT_MARGIN)
    }

    /// The canvas state for a frame, loading its bytes from the store on
    /// first touch. A load failure is logged and the canvas starts blank.
    pub(crate) fn ensure_canvas(&mut self, frame: &CanvasFrame) -> &mut CanvasState {
        match self.canvases.entry(frame.id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let resolution = frame.resolution;
                let expected = resolution as usize * resolution as usize;
                let base = match self.store.read(frame.id) {
                    Ok(bytes) if bytes.len() == expected => {
                        PixelImage::from_bytes(resolution, resolution, bytes)
                    }
                    Ok(bytes) => {
                        warn!(
                            "stored canvas {} has {} bytes, expected {expected}; starting blank",
                            frame.id,
                            bytes.len()
                        );
                        PixelImage::filled(resolution, resolution, BACKGROUND)
                    }
                    Err(err) => {
                        debug!("no stored pixels for canvas {}: {err}", frame.id);
                        PixelImage::filled(resolution, resolution, BACKGROUND)
                    }
                };
                entry.insert(CanvasState {
                    resolution,
                    layers: LayeredCanvas::new(base),
                })
            }
        }
    }

    /// Discard the overlays of an in-progress stroke while keeping the
    /// stroke itself alive; line/rect previews redraw from scratch.
    pub(crate) fn discard_preview(&mut self, session: &mut Session) {
        let Some(stroke) = session.stroke.as_mut() else {
            return;
        };
        for frame in stroke.touched.drain(..) {
            if let Some(state) = self.canvases.get_mut(&frame) {
                state.layers.discard(session.author);
            }
        }
    }

    /// Commit an in-progress stroke: capture the memento, merge every
    /// overlay into its base and push the memento onto the author's
    /// history.
    pub(crate) fn commit_stroke(&mut self, session: &mut Session) {
        let Some(stroke) = session.stroke.take() else {
            return;
        };
        let mut entries = Vec::new();
        for frame in stroke.touched {
            let Some(state) = self.canvases.get_mut(&frame) else {
                continue;
            };
            if let Some(entry) = MementoEntry::capture(session.author, frame, &state.layers) {
                entries.push(entry);
            }
            state.layers.apply(session.author);
        }
        if !entries.is_empty() {
            debug!(
                "committed stroke by {} across {} canvases",
                session.author,
                entries.len()
            );
        }
        session.history.push(StrokeMemento::new(entries));
    }

    /// Abort an in-progress stroke, dropping every overlay unmerged.
    pub(crate) fn cancel_stroke(&mut self, session: &mut Session) {
        let Some(stroke) = session.stroke.take() else {
            return;
        };
        for frame in stroke.touched {
            if let Some(state) = self.canvases.get_mut(&frame) {
                state.layers.discard(session.author);
            }
        }
        debug!("cancelled stroke by {}", session.author);
    }

    /// Undo for one author: an in-progress stroke is cancelled; otherwise
    /// the most recent memento restores its snapshots into the bases.
    fn undo(&mut self, author: AuthorId) {
        let sessions = Arc::clone(&self.sessions);
        let Some(mut guard) = sessions.get_mut(&author) else {
            return;
        };
        let session = &mut *guard;
        if session.is_painting() {
            self.cancel_stroke(session);
            return;
        }
        let Some(memento) = session.history.pop() else {
            return;
        };
        for entry in memento.entries() {
            if let Some(state) = self.canvases.get_mut(&entry.frame()) {
                entry.restore(state.layers.base_mut());
            }
        }
        debug!("undid stroke by {author}");
    }

    /// Push every consumable dirty region to observers as a composed
    /// sub-image and mark it for persistence flush.
    fn flush(&mut self) {
        for (id, state) in self.canvases.iter_mut() {
            let Some(region) = state.layers.take_sync_region() else {
                continue;
            };
            let mut composed = PixelImage::new(state.resolution, state.resolution);
            state.layers.compose(&mut composed);
            let bytes = composed.sub_image(region);
            self.sync.push_region(*id, region, &bytes);
            self.store.mark_dirty(*id, region);
        }
    }

    /// Persist every loaded canvas base through the store.
    pub fn save_all(&self) {
        for (id, state) in &self.canvases {
            if let Err(err) = self.store.write(*id, state.layers.base().data()) {
                warn!("failed to persist canvas {id}: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Brush;
    use crate::world::{StoreError, StoreResult};
    use kurbo::Point;
    use mural_core::frame::{FramePose, FrameRotation};
    use mural_core::raster::DirtyRect;
    use std::sync::Mutex;
    use uuid::Uuid;

    struct FixedFrames(Vec<CanvasFrame>);

    impl FrameIndex for FixedFrames {
        fn frames_near(&self, _point: DVec3, _radius: f64) -> Vec<CanvasFrame> {
            self.0.clone()
        }

        fn frames_in_box(&self, _min: DVec3, _max: DVec3, _margin: f64) -> Vec<CanvasFrame> {
            self.0.clone()
        }
    }

    struct NoOcclusion;

    impl Occlusion for NoOcclusion {
        fn first_obstruction(&self, _eye: &Line3, _max_distance: f64) -> Option<f64> {
            None
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        bytes: Mutex<HashMap<FrameId, Vec<u8>>>,
        dirty_marks: Mutex<Vec<(FrameId, DirtyRect)>>,
    }

    impl CanvasStore for MemoryStore {
        fn read(&self, frame: FrameId) -> StoreResult<Vec<u8>> {
            self.bytes
                .lock()
                .unwrap()
                .get(&frame)
                .cloned()
                .ok_or(StoreError::NotFound(frame))
        }

        fn write(&self, frame: FrameId, bytes: &[u8]) -> StoreResult<()> {
            self.bytes.lock().unwrap().insert(frame, bytes.to_vec());
            Ok(())
        }

        fn mark_dirty(&self, frame: FrameId, region: DirtyRect) {
            self.dirty_marks.lock().unwrap().push((frame, region));
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        pushes: Mutex<Vec<(FrameId, DirtyRect, Vec<u8>)>>,
    }

    impl SyncSink for RecordingSink {
        fn push_region(&self, frame: FrameId, region: DirtyRect, bytes: &[u8]) {
            self.pushes
                .lock()
                .unwrap()
                .push((frame, region, bytes.to_vec()));
        }
    }

    /// A canvas in the z = 0 plane centered at `x`, drawable side facing
    /// viewers at positive z.
    fn wall_frame(x: f64) -> CanvasFrame {
        let pose = FramePose::new(DVec3::new(x, 0.0, 0.0), 0.0, 0.0, 0.5);
        CanvasFrame::new(Uuid::new_v4(), pose, FrameRotation::None, 128)
    }

    fn engine_with(
        frames: Vec<CanvasFrame>,
    ) -> (PaintEngine, Arc<MemoryStore>, Arc<RecordingSink>) {
        let store = Arc::new(MemoryStore::default());
        let sink = Arc::new(RecordingSink::default());
        let engine = PaintEngine::new(
            Arc::new(FixedFrames(frames)),
            Arc::new(NoOcclusion),
            store.clone(),
            sink.clone(),
        );
        (engine, store, sink)
    }

    /// Eye line looking straight at the given pixel from two blocks away.
    fn eye_for_pixel(frame: &CanvasFrame, px: f64, py: f64) -> Line3 {
        let world = frame.pixel_to_world(Point::new(px, py));
        Line3::new(
            DVec3::new(world.x, world.y, 2.0),
            DVec3::new(0.0, 0.0, -1.0),
        )
    }

    fn input(author: AuthorId, eye: Line3, action: InputAction) -> Task {
        Task::Input(InputEvent { author, eye, action })
    }

    fn open_with_brush(engine: &PaintEngine, author: AuthorId, color: u8) {
        let handle = engine.handle();
        handle.submit(Task::OpenSession { author });
        handle.submit(Task::SetBrush {
            author,
            brush: Brush {
                color,
                thickness: 1,
            },
        });
    }

    #[test]
    fn test_pencil_stroke_across_canvases() {
        let a = wall_frame(0.0);
        let b = wall_frame(1.0);
        let (mut engine, _store, sink) = engine_with(vec![a, b]);
        let author = Uuid::new_v4();
        let handle = engine.handle();

        open_with_brush(&engine, author, 7);
        handle.submit(input(author, eye_for_pixel(&a, 100.0, 64.0), InputAction::PressLeft));
        handle.submit(input(author, eye_for_pixel(&b, 30.0, 64.0), InputAction::Move));
        handle.submit(input(author, eye_for_pixel(&b, 30.0, 64.0), InputAction::Release));
        engine.pump();

        // Continuous ink on both sides of the shared edge.
        let canvas_a = engine.canvas(a.id).unwrap();
        assert_eq!(canvas_a.layers.base().get(100, 64), Some(7));
        assert_eq!(canvas_a.layers.base().get(127, 64), Some(7));
        let canvas_b = engine.canvas(b.id).unwrap();
        assert_eq!(canvas_b.layers.base().get(0, 64), Some(7));
        assert_eq!(canvas_b.layers.base().get(29, 64), Some(7));

        // Overlays are gone after commit.
        assert_eq!(canvas_a.layers.overlay_count(), 0);
        assert_eq!(canvas_b.layers.overlay_count(), 0);

        // Observers received both canvases' dirty regions.
        let pushes = sink.pushes.lock().unwrap();
        assert!(pushes
            .iter()
            .any(|(id, region, _)| *id == a.id && region.contains(110, 64)));
        assert!(pushes
            .iter()
            .any(|(id, region, _)| *id == b.id && region.contains(15, 64)));
    }

    #[test]
    fn test_undo_restores_committed_stroke() {
        let a = wall_frame(0.0);
        let b = wall_frame(1.0);
        let (mut engine, _store, _sink) = engine_with(vec![a, b]);
        let author = Uuid::new_v4();
        let handle = engine.handle();

        open_with_brush(&engine, author, 7);
        handle.submit(input(author, eye_for_pixel(&a, 100.0, 64.0), InputAction::PressLeft));
        handle.submit(input(author, eye_for_pixel(&b, 30.0, 64.0), InputAction::Move));
        handle.submit(input(author, eye_for_pixel(&b, 30.0, 64.0), InputAction::Release));
        engine.pump();

        handle.submit(Task::Undo { author });
        engine.pump();

        let canvas_a = engine.canvas(a.id).unwrap();
        let canvas_b = engine.canvas(b.id).unwrap();
        assert!(canvas_a.layers.base().data().iter().all(|&v| v == BACKGROUND));
        assert!(canvas_b.layers.base().data().iter().all(|&v| v == BACKGROUND));
    }

    #[test]
    fn test_undo_mid_stroke_cancels_preview() {
        let a = wall_frame(0.0);
        let (mut engine, _store, _sink) = engine_with(vec![a]);
        let author = Uuid::new_v4();
        let handle = engine.handle();

        open_with_brush(&engine, author, 7);
        handle.submit(input(author, eye_for_pixel(&a, 40.0, 64.0), InputAction::PressLeft));
        handle.submit(input(author, eye_for_pixel(&a, 90.0, 64.0), InputAction::Move));
        handle.submit(Task::Undo { author });
        handle.submit(input(author, eye_for_pixel(&a, 90.0, 64.0), InputAction::Release));
        engine.pump();

        let canvas = engine.canvas(a.id).unwrap();
        assert!(canvas.layers.base().data().iter().all(|&v| v == BACKGROUND));
        assert_eq!(canvas.layers.overlay_count(), 0);
        // The cancelled stroke never reached the history.
        let sessions = engine.sessions();
        assert!(sessions.get(&author).unwrap().history.is_empty());
    }

    #[test]
    fn test_right_press_cancels_stroke() {
        let a = wall_frame(0.0);
        let (mut engine, _store, _sink) = engine_with(vec![a]);
        let author = Uuid::new_v4();
        let handle = engine.handle();

        open_with_brush(&engine, author, 7);
        handle.submit(input(author, eye_for_pixel(&a, 40.0, 64.0), InputAction::PressLeft));
        handle.submit(input(author, eye_for_pixel(&a, 90.0, 64.0), InputAction::Move));
        handle.submit(input(author, eye_for_pixel(&a, 90.0, 64.0), InputAction::PressRight));
        engine.pump();

        let canvas = engine.canvas(a.id).unwrap();
        assert!(canvas.layers.base().data().iter().all(|&v| v == BACKGROUND));
    }

    #[test]
    fn test_fill_commits_immediately() {
        let a = wall_frame(0.0);
        let (mut engine, _store, sink) = engine_with(vec![a]);
        let author = Uuid::new_v4();
        let handle = engine.handle();

        open_with_brush(&engine, author, 9);
        handle.submit(Task::SetTool {
            author,
            tool: ToolKind::Fill,
        });
        handle.submit(input(author, eye_for_pixel(&a, 64.0, 64.0), InputAction::PressLeft));
        engine.pump();

        let canvas = engine.canvas(a.id).unwrap();
        assert!(canvas.layers.base().data().iter().all(|&v| v == 9));
        assert_eq!(canvas.layers.overlay_count(), 0);
        assert!(!sink.pushes.lock().unwrap().is_empty());

        // And the whole fill undoes as one stroke.
        handle.submit(Task::Undo { author });
        engine.pump();
        let canvas = engine.canvas(a.id).unwrap();
        assert!(canvas.layers.base().data().iter().all(|&v| v == BACKGROUND));
    }

    #[test]
    fn test_line_tool_previews_are_discarded() {
        let a = wall_frame(0.0);
        let (mut engine, _store, _sink) = engine_with(vec![a]);
        let author = Uuid::new_v4();
        let handle = engine.handle();

        open_with_brush(&engine, author, 7);
        handle.submit(Task::SetTool {
            author,
            tool: ToolKind::Line,
        });
        handle.submit(input(author, eye_for_pixel(&a, 20.0, 64.0), InputAction::PressLeft));
        handle.submit(input(author, eye_for_pixel(&a, 100.0, 20.0), InputAction::Move));
        handle.submit(input(author, eye_for_pixel(&a, 100.0, 100.0), InputAction::Move));
        handle.submit(input(author, eye_for_pixel(&a, 100.0, 100.0), InputAction::Release));
        engine.pump();

        let base = engine.canvas(a.id).unwrap().layers.base();
        // Midpoint of the final line is inked, midpoint of the abandoned
        // preview is not.
        assert_eq!(base.get(60, 82), Some(7));
        assert_eq!(base.get(60, 42), Some(BACKGROUND));
    }

    #[test]
    fn test_rect_tool_outlines() {
        let a = wall_frame(0.0);
        let (mut engine, _store, _sink) = engine_with(vec![a]);
        let author = Uuid::new_v4();
        let handle = engine.handle();

        open_with_brush(&engine, author, 7);
        handle.submit(Task::SetTool {
            author,
            tool: ToolKind::Rect,
        });
        handle.submit(input(author, eye_for_pixel(&a, 20.0, 30.0), InputAction::PressLeft));
        handle.submit(input(author, eye_for_pixel(&a, 90.0, 100.0), InputAction::Release));
        engine.pump();

        let base = engine.canvas(a.id).unwrap().layers.base();
        assert_eq!(base.get(55, 30), Some(7));
        assert_eq!(base.get(20, 65), Some(7));
        assert_eq!(base.get(90, 100), Some(7));
        // The interior stays empty.
        assert_eq!(base.get(55, 65), Some(BACKGROUND));
    }

    #[test]
    fn test_store_roundtrip() {
        let a = wall_frame(0.0);
        let (mut engine, store, _sink) = engine_with(vec![a]);
        let author = Uuid::new_v4();
        let handle = engine.handle();

        // Pre-seed the store with an existing picture.
        let mut seeded = vec![5u8; 128 * 128];
        seeded[0] = 6;
        store.bytes.lock().unwrap().insert(a.id, seeded);

        open_with_brush(&engine, author, 7);
        handle.submit(input(author, eye_for_pixel(&a, 64.0, 64.0), InputAction::PressLeft));
        handle.submit(input(author, eye_for_pixel(&a, 64.0, 64.0), InputAction::Release));
        engine.pump();

        // Existing pixels survived the load, the dot landed on top.
        let base = engine.canvas(a.id).unwrap().layers.base();
        assert_eq!(base.get(0, 0), Some(6));
        assert_eq!(base.get(1, 0), Some(5));
        assert_eq!(base.get(64, 64), Some(7));

        // Dirty regions were marked for flush, and save_all persists.
        assert!(!store.dirty_marks.lock().unwrap().is_empty());
        engine.save_all();
        let saved = store.bytes.lock().unwrap().get(&a.id).cloned().unwrap();
        assert_eq!(saved[64 * 128 + 64], 7);
        assert_eq!(saved[0], 6);
    }

    #[test]
    fn test_input_for_unknown_session_is_ignored() {
        let a = wall_frame(0.0);
        let (mut engine, _store, sink) = engine_with(vec![a]);
        let handle = engine.handle();
        handle.submit(input(
            Uuid::new_v4(),
            eye_for_pixel(&a, 64.0, 64.0),
            InputAction::PressLeft,
        ));
        engine.pump();
        assert_eq!(engine.canvas_count(), 0);
        assert!(sink.pushes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_set_brush_rejects_sentinel_color() {
        let (mut engine, _store, _sink) = engine_with(vec![]);
        let author = Uuid::new_v4();
        let handle = engine.handle();
        handle.submit(Task::OpenSession { author });
        handle.submit(Task::SetBrush {
            author,
            brush: Brush {
                color: CLEAR,
                thickness: 4,
            },
        });
        engine.pump();
        let sessions = engine.sessions();
        assert_eq!(sessions.get(&author).unwrap().brush, Brush::default());
    }

    #[test]
    fn test_close_session_discards_live_stroke() {
        let a = wall_frame(0.0);
        let (mut engine, _store, _sink) = engine_with(vec![a]);
        let author = Uuid::new_v4();
        let handle = engine.handle();

        open_with_brush(&engine, author, 7);
        handle.submit(input(author, eye_for_pixel(&a, 40.0, 64.0), InputAction::PressLeft));
        handle.submit(Task::CloseSession { author });
        engine.pump();

        assert!(engine.sessions().get(&author).is_none());
        let canvas = engine.canvas(a.id).unwrap();
        assert_eq!(canvas.layers.overlay_count(), 0);
        assert!(canvas.layers.base().data().iter().all(|&v| v == BACKGROUND));
    }
}
