//! Drag list configuration

use dragflow_animation::SpringConfig;

use crate::error::{DragListError, Result};

/// Distance from a viewport edge (px) within which auto-scroll kicks in
pub const DEFAULT_AUTOSCROLL_THRESHOLD: f32 = 30.0;
/// Scroll step (px per frame) at the very edge of the threshold band
pub const DEFAULT_AUTOSCROLL_SPEED: f32 = 100.0;
/// Slack used when asking "is the list already at its top/bottom"
pub const SCROLL_POSITION_TOLERANCE: f32 = 2.0;
/// How long layout animations stay suppressed after a drag ends (seconds)
pub const LAYOUT_ANIMATION_REENABLE_DELAY: f32 = 0.1;

// ============================================================================
// Axis
// ============================================================================

/// Scroll/drag axis of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    /// Pick the component along this axis
    pub fn pick(&self, x: f32, y: f32) -> f32 {
        match self {
            Axis::Vertical => y,
            Axis::Horizontal => x,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Axis::Horizontal)
    }
}

// ============================================================================
// Hit Slop
// ============================================================================

/// Expansion of the touch target beyond its laid-out bounds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitSlop {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl HitSlop {
    pub const NONE: HitSlop = HitSlop {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Same expansion on every side
    pub const fn uniform(amount: f32) -> Self {
        Self {
            top: amount,
            right: amount,
            bottom: amount,
            left: amount,
        }
    }

    /// Expansion along one axis only
    pub const fn along(axis: Axis, amount: f32) -> Self {
        match axis {
            Axis::Vertical => Self {
                top: amount,
                right: 0.0,
                bottom: amount,
                left: 0.0,
            },
            Axis::Horizontal => Self {
                top: 0.0,
                right: amount,
                bottom: 0.0,
                left: amount,
            },
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

// ============================================================================
// Drag List Configuration
// ============================================================================

/// Configuration for drag behavior
#[derive(Debug, Clone, Copy)]
pub struct DragListConfig {
    /// List orientation; drags are locked to this axis
    pub axis: Axis,
    /// Pan distance along the axis before a drag activates (0 = immediately)
    pub activation_distance: f32,
    /// Touch target expansion
    pub drag_hit_slop: HitSlop,
    /// Whether the list scrolls at all when no drag is active
    pub scroll_enabled: bool,
    /// Edge band (px) that triggers auto-scroll
    pub autoscroll_threshold: f32,
    /// Maximum auto-scroll step (px per frame)
    pub autoscroll_speed: f32,
    /// Slack for "already at top/bottom" and "scroll target reached"
    pub scroll_position_tolerance: f32,
    /// Let the dragged item leave the visible list viewport
    pub drag_item_overflow: bool,
    /// Suppress layout animations while dragging and briefly afterwards
    pub enable_layout_animation: bool,
    /// Fine-grained pointer platform (web/desktop): pans start with no
    /// minimum distance
    pub fine_pointer: bool,
    /// Spring used to settle the dropped item into its slot
    pub animation: SpringConfig,
}

impl Default for DragListConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            activation_distance: 0.0,
            drag_hit_slop: HitSlop::NONE,
            scroll_enabled: true,
            autoscroll_threshold: DEFAULT_AUTOSCROLL_THRESHOLD,
            autoscroll_speed: DEFAULT_AUTOSCROLL_SPEED,
            scroll_position_tolerance: SCROLL_POSITION_TOLERANCE,
            drag_item_overflow: false,
            enable_layout_animation: false,
            fine_pointer: false,
            animation: SpringConfig::settle(),
        }
    }
}

impl DragListConfig {
    /// Horizontal list with otherwise default settings
    pub fn horizontal() -> Self {
        Self {
            axis: Axis::Horizontal,
            ..Default::default()
        }
    }

    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn activation_distance(mut self, distance: f32) -> Self {
        self.activation_distance = distance;
        self
    }

    pub fn drag_hit_slop(mut self, hit_slop: HitSlop) -> Self {
        self.drag_hit_slop = hit_slop;
        self
    }

    pub fn scroll_enabled(mut self, enabled: bool) -> Self {
        self.scroll_enabled = enabled;
        self
    }

    pub fn autoscroll_threshold(mut self, threshold: f32) -> Self {
        self.autoscroll_threshold = threshold;
        self
    }

    pub fn autoscroll_speed(mut self, speed: f32) -> Self {
        self.autoscroll_speed = speed;
        self
    }

    pub fn drag_item_overflow(mut self, overflow: bool) -> Self {
        self.drag_item_overflow = overflow;
        self
    }

    pub fn enable_layout_animation(mut self, enabled: bool) -> Self {
        self.enable_layout_animation = enabled;
        self
    }

    pub fn fine_pointer(mut self, fine: bool) -> Self {
        self.fine_pointer = fine;
        self
    }

    pub fn animation(mut self, spring: SpringConfig) -> Self {
        self.animation = spring;
        self
    }

    /// Reject settings that would make the control loop misbehave
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("autoscroll_threshold", self.autoscroll_threshold),
            ("autoscroll_speed", self.autoscroll_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(DragListError::InvalidConfig { field, value });
            }
        }

        let non_negative = [
            ("activation_distance", self.activation_distance),
            ("scroll_position_tolerance", self.scroll_position_tolerance),
            ("drag_hit_slop.top", self.drag_hit_slop.top),
            ("drag_hit_slop.right", self.drag_hit_slop.right),
            ("drag_hit_slop.bottom", self.drag_hit_slop.bottom),
            ("drag_hit_slop.left", self.drag_hit_slop.left),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(DragListError::InvalidConfig { field, value });
            }
        }

        if !self.animation.is_valid() {
            return Err(DragListError::InvalidSpring {
                stiffness: self.animation.stiffness,
                damping: self.animation.damping,
                mass: self.animation.mass,
            });
        }
        Ok(())
    }
}
