//! Host collaborators
//!
//! The engine never owns a scroll view. It issues imperative commands to
//! whatever the host wires in through these traits.

/// Rectangle in window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Layout reported for the list container
pub type Layout = Rect;

/// Anything that accepts an imperative scroll command along its scroll axis
pub trait ScrollTarget {
    fn scroll_to(&mut self, offset: f32, animated: bool);
}

/// An ancestor scroll view hosting the list
pub trait OuterScrollContainer: ScrollTarget {
    /// Enable or disable the container's own (native) scroll input
    fn set_scroll_enabled(&mut self, enabled: bool);

    /// Viewport of the container in window coordinates, None if it is not
    /// mounted yet
    fn measure_in_window(&self) -> Option<Rect>;
}

/// Scroll target for lists whose host drives scrolling some other way
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScroll;

impl ScrollTarget for NoScroll {
    fn scroll_to(&mut self, _offset: f32, _animated: bool) {}
}
