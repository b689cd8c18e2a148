//! Mural Engine Library
//!
//! Paint tools, per-author sessions, the simulation task queue and the
//! dirty-region sync flush on top of the `mural-core` kernel.

pub mod engine;
pub mod queue;
pub mod session;
pub mod tools;
pub mod world;

pub use engine::{CanvasState, PaintEngine};
pub use queue::{sim_queue, InputAction, InputEvent, SimHandle, Task};
pub use session::{Brush, Session, StrokeState};
pub use tools::ToolKind;
pub use world::{CanvasStore, FrameIndex, Occlusion, StoreError, StoreResult, SyncSink};
