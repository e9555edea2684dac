//! Inner auto-scroll
//!
//! Keeps the list itself moving while the dragged item hovers near the top
//! or bottom edge of the visible viewport. Runs once per frame after the
//! spacer index has been refreshed.

use crate::config::DragListConfig;
use crate::drag::hover_offset;
use crate::host::ScrollTarget;
use crate::session::DragSession;

/// Distances from the hovering item to each viewport edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDistances {
    pub top: f32,
    pub bottom: f32,
}

impl EdgeDistances {
    /// Measure the hover position (content coordinates) against the viewport
    pub fn measure<K>(session: &DragSession<K>, hover: f32) -> Self {
        let hover_screen = hover - session.scroll_offset;
        Self {
            top: hover_screen.max(0.0),
            bottom: (session.container_size - (hover_screen + session.active_cell.size)).max(0.0),
        }
    }
}

/// Scroll direction for one inner step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
}

/// Inner list auto-scroll engine
#[derive(Debug, Default)]
pub struct InnerAutoScroll {
    /// Offset requested by the last step
    target: f32,
}

impl InnerAutoScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last requested offset
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Re-anchor on drag start so the first step is not held back by a stale
    /// target
    pub fn anchor(&mut self, offset: f32) {
        self.target = offset;
    }

    /// Advance one frame. Issues at most one `scroll_to` and returns the new
    /// offset when it scrolled.
    pub fn step<K>(
        &mut self,
        session: &mut DragSession<K>,
        config: &DragListConfig,
        list: &mut dyn ScrollTarget,
    ) -> Option<f32> {
        if !session.is_active() || session.phase.is_frozen() {
            return None;
        }

        let tolerance = config.scroll_position_tolerance;
        let threshold = config.autoscroll_threshold;
        let offset = session.scroll_offset;

        // Previous request still in flight
        if (self.target - offset).abs() >= tolerance {
            return None;
        }

        let distances = EdgeDistances::measure(session, hover_offset(session, config));
        let at_top = distances.top <= threshold;
        let at_bottom = distances.bottom <= threshold;
        let scrolled_up = offset - tolerance <= 0.0;
        let scrolled_down = offset + session.container_size + tolerance >= session.content_size;

        if (at_top && scrolled_up) || (at_bottom && scrolled_down) {
            return None;
        }
        let (edge, dist) = if at_top {
            (Edge::Top, distances.top)
        } else if at_bottom {
            (Edge::Bottom, distances.bottom)
        } else {
            return None;
        };

        let delta = (1.0 - dist / threshold) * config.autoscroll_speed;
        let next = match edge {
            Edge::Top => (offset - delta).max(0.0),
            Edge::Bottom => (offset + delta).min(session.content_size - session.container_size),
        };

        tracing::trace!(
            "autoscroll: {:?} edge dist={:.1} {:.1} -> {:.1}",
            edge,
            dist,
            offset,
            next
        );
        self.target = next;
        list.scroll_to(next, false);
        session.scroll_offset = next;
        Some(next)
    }
}
