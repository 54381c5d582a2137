use std::cell::Cell;
use std::rc::Rc;

use crate::Vector2;

/// Yields at most one requested direction per movement tick
pub trait InputSource {
    fn current_direction(&mut self) -> Option<Vector2>;
}

/// Single-slot, last-writer-wins direction buffer.
///
/// Clones share the slot: the host keeps one handle and pushes from its
/// key/touch callbacks, the game consumes through [`InputSource`]. Requests
/// are validated only when consumed.
#[derive(Debug, Clone, Default)]
pub struct DirectionBuffer {
    slot: Rc<Cell<Option<Vector2>>>,
}

impl DirectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a direction, overwriting any unconsumed request
    pub fn push(&self, direction: Vector2) {
        self.slot.set(Some(direction));
    }

    pub fn peek(&self) -> Option<Vector2> {
        self.slot.get()
    }

    pub fn clear(&self) {
        self.slot.set(None);
    }
}

impl InputSource for DirectionBuffer {
    fn current_direction(&mut self) -> Option<Vector2> {
        self.slot.take()
    }
}

/// Input source that never asks for a turn
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn current_direction(&mut self) -> Option<Vector2> {
        None
    }
}
