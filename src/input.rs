//! Live input state handed to each frame update.

use std::collections::HashSet;

/// Keys the camera movement policy understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Shift,
    Escape,
}

/// Set of currently pressed keys plus the pointer movement accumulated since
/// the previous update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pressed: HashSet<Key>,
    pointer_delta: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn pressed(&self) -> impl Iterator<Item = Key> + '_ {
        self.pressed.iter().copied()
    }

    /// Add pointer motion (in pixels) observed since the last update.
    pub fn move_pointer(&mut self, dx: f32, dy: f32) {
        self.pointer_delta.0 += dx;
        self.pointer_delta.1 += dy;
    }

    pub fn pointer_delta(&self) -> (f32, f32) {
        self.pointer_delta
    }

    /// Called by the frame driver after every update: pointer motion resets,
    /// held keys stay held.
    pub fn end_frame(&mut self) {
        self.pointer_delta = (0.0, 0.0);
    }
}
