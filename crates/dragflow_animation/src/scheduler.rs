//! Animation scheduler
//!
//! Owns every live spring and steps them once per frame.

use crate::spring::Spring;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct SpringId;
}

/// Longest frame delta the scheduler will integrate in one step
const MAX_FRAME_DT: f32 = 0.1;

/// The animation scheduler that steps all active springs
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        let target = spring.target();
        let id = self.springs.insert(spring);
        tracing::trace!(?id, target, "spring added");
        id
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        let removed = self.springs.remove(id);
        if let Some(spring) = &removed {
            tracing::trace!(?id, value = spring.value(), "spring removed");
        }
        removed
    }

    /// Step all springs by an explicit frame delta in seconds.
    ///
    /// Deltas are capped so a stalled frame (app backgrounded, debugger
    /// pause) does not teleport animations.
    pub fn step(&mut self, dt: f32) {
        if dt > MAX_FRAME_DT {
            tracing::debug!(dt, cap = MAX_FRAME_DT, "stalled frame capped");
        }
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
