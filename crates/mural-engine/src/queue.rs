//! Task hand-off onto the simulation thread.
//!
//! Network and input listeners never touch canvas state. They package what
//! they observed into a [`Task`] and submit it through a [`SimHandle`]; the
//! engine drains the queue on the simulation thread.

use std::sync::mpsc::{channel, Receiver, Sender};

use mural_core::geom::Line3;
use mural_core::AuthorId;

use crate::session::Brush;
use crate::tools::ToolKind;

/// Classification of one observed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    PressLeft,
    PressRight,
    Move,
    Release,
}

/// One observed input event, packaged by a listener thread.
#[derive(Debug, Clone, Copy)]
pub struct InputEvent {
    pub author: AuthorId,
    /// Eye line at the time of the event.
    pub eye: Line3,
    pub action: InputAction,
}

/// Work scheduled onto the simulation thread.
#[derive(Debug, Clone)]
pub enum Task {
    Input(InputEvent),
    Undo { author: AuthorId },
    SetTool { author: AuthorId, tool: ToolKind },
    SetBrush { author: AuthorId, brush: Brush },
    OpenSession { author: AuthorId },
    CloseSession { author: AuthorId },
}

/// Cloneable submission handle held by listener threads.
#[derive(Debug, Clone)]
pub struct SimHandle {
    tx: Sender<Task>,
}

impl SimHandle {
    /// Enqueue a task; returns false when the simulation side is gone.
    pub fn submit(&self, task: Task) -> bool {
        self.tx.send(task).is_ok()
    }
}

/// Build the queue pair: a handle for listeners and the receiver the
/// simulation thread drains.
pub fn sim_queue() -> (SimHandle, Receiver<Task>) {
    let (tx, rx) = channel();
    (SimHandle { tx }, rx)
}
