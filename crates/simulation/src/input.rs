//! Explicit per-tick input state consumed by the consist driver.
//!
//! Replaces the original toy's shared key-flag bag: the keyboard system (and
//! the HUD buttons) write this resource, the core only reads it. Throttle
//! flags are level-triggered; add/remove are already-debounced one-tick
//! triggers cleared by the consumer.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ThrottleInput {
    /// Throttle-up held this tick.
    pub forward: bool,
    /// Throttle-down / brake held this tick.
    pub backward: bool,
    /// Couple one wagon (edge-triggered).
    pub add_wagon: bool,
    /// Uncouple the last wagon (edge-triggered).
    pub remove_wagon: bool,
}

impl ThrottleInput {
    /// Clears the one-shot triggers once they have been consumed.
    pub fn clear_triggers(&mut self) {
        self.add_wagon = false;
        self.remove_wagon = false;
    }
}
