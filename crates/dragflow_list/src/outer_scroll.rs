//! Outer auto-scroll
//!
//! Scrolls an ancestor scroll container when the pointer nears the edges of
//! its viewport during a drag, and locks the container's own scrolling while
//! a drag session exists so the two gestures do not fight.

use dragflow_core::events::PointerKind;
use dragflow_core::fsm::{EventId, StateTransitions};

use crate::config::Axis;
use crate::host::OuterScrollContainer;

/// Outer scroll events
pub mod outer_events {
    use dragflow_core::fsm::EventId;

    /// Pointer entered the band at the leading edge
    pub const ENTER_TOP: EventId = 1;
    /// Pointer entered the band at the trailing edge
    pub const ENTER_BOTTOM: EventId = 2;
    /// Pointer is away from both edges, or the drag ended
    pub const LEAVE: EventId = 3;
    /// Container did not move in the requested direction
    pub const SATURATED: EventId = 4;
}

/// Outer auto-scroll state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OuterScrollState {
    #[default]
    Idle,
    Up,
    Down,
}

impl StateTransitions for OuterScrollState {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use outer_events::*;
        match (self, event) {
            (_, ENTER_TOP) => Some(OuterScrollState::Up),
            (_, ENTER_BOTTOM) => Some(OuterScrollState::Down),
            (_, LEAVE) => Some(OuterScrollState::Idle),
            (OuterScrollState::Up | OuterScrollState::Down, SATURATED) => {
                Some(OuterScrollState::Idle)
            }
            _ => None,
        }
    }
}

/// Direction of the last outer scroll request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDir {
    #[default]
    None,
    Up,
    Down,
}

impl ScrollDir {
    pub fn sign(&self) -> f32 {
        match self {
            ScrollDir::None => 0.0,
            ScrollDir::Up => -1.0,
            ScrollDir::Down => 1.0,
        }
    }
}

/// Outer container auto-scroll engine
pub struct OuterAutoScroll {
    container: Box<dyn OuterScrollContainer>,
    axis: Axis,
    state: OuterScrollState,
    /// Viewport edges in window coordinates
    top: f32,
    bottom: f32,
    /// Last observed container offset
    offset: Option<f32>,
    /// Offset requested by the last step
    attempted: f32,
    last_dir: ScrollDir,
    pointer: Option<f32>,
    locked: bool,
}

impl std::fmt::Debug for OuterAutoScroll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OuterAutoScroll")
            .field("axis", &self.axis)
            .field("state", &self.state)
            .field("top", &self.top)
            .field("bottom", &self.bottom)
            .field("offset", &self.offset)
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}

impl OuterAutoScroll {
    /// Attach to a container and take its first measurement
    pub fn attach(container: Box<dyn OuterScrollContainer>, axis: Axis) -> Self {
        let mut engine = Self {
            container,
            axis,
            state: OuterScrollState::Idle,
            top: 0.0,
            bottom: 0.0,
            offset: None,
            attempted: 0.0,
            last_dir: ScrollDir::None,
            pointer: None,
            locked: false,
        };
        engine.measure();
        engine
    }

    pub fn state(&self) -> OuterScrollState {
        self.state
    }

    /// Scroll axis of the container
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Viewport edges along the axis, in window coordinates
    pub fn bounds(&self) -> (f32, f32) {
        (self.top, self.bottom)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Offset requested by the last step
    pub fn attempted_offset(&self) -> f32 {
        self.attempted
    }

    /// Re-measure the container viewport. Called on attach, layout and resize.
    pub fn measure(&mut self) {
        match self.container.measure_in_window() {
            Some(rect) => {
                self.top = self.axis.pick(rect.x, rect.y);
                self.bottom = self.top + self.axis.pick(rect.width, rect.height);
                tracing::trace!("outer: measured {:.1}..{:.1}", self.top, self.bottom);
            }
            None => {
                tracing::warn!("outer: container could not be measured, keeping last bounds");
            }
        }
    }

    /// Disable the container's scrolling for a new drag session. Mouse
    /// pointers keep wheel scrolling.
    pub fn lock(&mut self, pointer: PointerKind) {
        if pointer.is_mouse() {
            tracing::trace!("outer: mouse pointer, scroll lock skipped");
            return;
        }
        self.container.set_scroll_enabled(false);
        self.locked = true;
    }

    /// Restore the container's scrolling and stop any auto-scroll
    pub fn unlock(&mut self) {
        self.container.set_scroll_enabled(true);
        self.locked = false;
        self.pointer = None;
        self.last_dir = ScrollDir::None;
        self.state.send(outer_events::LEAVE);
    }

    /// Pointer moved (or lifted). Re-evaluates the scroll state.
    pub fn on_pointer(&mut self, pointer: Option<f32>, session_active: bool, threshold: f32) {
        self.pointer = pointer;
        let event = match pointer {
            Some(p) if session_active && p < self.top + threshold => outer_events::ENTER_TOP,
            Some(p) if session_active && p > self.bottom - threshold => outer_events::ENTER_BOTTOM,
            _ => outer_events::LEAVE,
        };
        self.state.send(event);
    }

    /// Advance one frame. Returns the requested offset when it scrolled.
    pub fn step(&mut self, session_active: bool, threshold: f32, speed: f32) -> Option<f32> {
        let pointer = self.pointer?;
        if !session_active {
            return None;
        }
        let offset = self.offset?;
        let (dist, dir) = match self.state {
            OuterScrollState::Idle => return None,
            OuterScrollState::Up => (pointer - self.top, ScrollDir::Up),
            OuterScrollState::Down => (self.bottom - pointer, ScrollDir::Down),
        };

        let pct = 1.0 - dist / threshold;
        if pct <= 0.0 {
            return None;
        }

        self.attempted = offset + pct * speed * dir.sign();
        self.last_dir = dir;
        tracing::trace!("outer: {:?} -> {:.1}", dir, self.attempted);
        self.container.scroll_to(self.attempted, false);
        Some(self.attempted)
    }

    /// Observed container offset. Goes idle when the container failed to move
    /// in the direction last requested.
    pub fn on_outer_scroll(&mut self, offset: f32) {
        let prev = self.offset.replace(offset);
        let Some(prev) = prev else {
            return;
        };
        if self.state == OuterScrollState::Idle {
            return;
        }
        let moved = match self.last_dir {
            ScrollDir::Down => offset > prev,
            ScrollDir::Up => offset < prev,
            ScrollDir::None => true,
        };
        if !moved {
            tracing::debug!("outer: saturated at {:.1}", offset);
            self.state.send(outer_events::SATURATED);
        }
    }
}

impl Drop for OuterAutoScroll {
    fn drop(&mut self) {
        self.container.set_scroll_enabled(true);
    }
}
