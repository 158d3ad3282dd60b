//! Cursor state and the save/restore stack.

use lsys_graphics::types::{Point, Scalar};

use crate::error::{ErrorKind, LsysError, LsysResult};

/// The turtle's drawing state during one interpretation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    pub position: Point,
    /// Degrees from the +x axis, counter-clockwise.
    pub heading: Scalar,
    pub pen_down: bool,
    pub pen_width: Scalar,
    pub step_length: Scalar,
    pub turning_angle: Scalar,
}

impl CursorState {
    /// Capture the restorable part of the state.
    pub const fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            heading: self.heading,
            step_length: self.step_length,
            pen_width: self.pen_width,
        }
    }

    /// Put back a saved snapshot. Pen and turning angle are untouched.
    pub const fn restore(&mut self, snapshot: &Snapshot) {
        self.position = snapshot.position;
        self.heading = snapshot.heading;
        self.step_length = snapshot.step_length;
        self.pen_width = snapshot.pen_width;
    }
}

/// What `[` saves and `]` restores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub position: Point,
    pub heading: Scalar,
    pub step_length: Scalar,
    pub pen_width: Scalar,
}

/// LIFO stack of snapshots.
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    frames: Vec<Snapshot>,
}

impl StateStack {
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.frames.push(snapshot);
    }

    /// Remove the most recent snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::StackUnderflow`] if the stack is empty.
    pub fn pop(&mut self) -> LsysResult<Snapshot> {
        self.frames.pop().ok_or_else(|| {
            LsysError::new(
                ErrorKind::StackUnderflow,
                "restore without a matching save",
            )
        })
    }

    /// Current nesting depth.
    pub const fn depth(&self) -> usize {
        self.frames.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
