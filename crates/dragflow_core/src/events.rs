//! Gesture event model
//!
//! Unified pan/touch events as delivered by a platform gesture recognizer.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Finger/pointer went down inside the gesture target
    pub const TOUCH_DOWN: EventType = 1;
    /// Finger/pointer lifted, independent of whether a pan was recognized
    pub const TOUCH_UP: EventType = 2;
    /// Pan recognizer began tracking
    pub const PAN_BEGIN: EventType = 3;
    /// Pan translation changed
    pub const PAN_UPDATE: EventType = 4;
    /// Pan ended (finger lifted after a pan)
    pub const PAN_END: EventType = 5;
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// Coarse classification of the input device driving a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerKind {
    #[default]
    Touch,
    Pen,
    Mouse,
    Key,
    Other,
}

impl PointerKind {
    /// Decode the raw pointer type reported by platform recognizers
    /// (0 = touch, 1 = stylus, 2 = mouse, 3 = key, anything else = other).
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => PointerKind::Touch,
            1 => PointerKind::Pen,
            2 => PointerKind::Mouse,
            3 => PointerKind::Key,
            _ => PointerKind::Other,
        }
    }

    /// Whether this pointer scrolls containers with a wheel rather than a drag
    pub const fn is_mouse(&self) -> bool {
        matches!(self, PointerKind::Mouse)
    }
}

/// A gesture event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Milliseconds, monotonic per platform
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    /// Touch down/up at a window position
    Touch {
        x: f32,
        y: f32,
        pointer: PointerKind,
    },
    /// Pan recognizer state: translation since begin plus the absolute
    /// (window) pointer position
    Pan {
        translation_x: f32,
        translation_y: f32,
        absolute_x: f32,
        absolute_y: f32,
        pointer: PointerKind,
    },
    Scroll {
        offset_x: f32,
        offset_y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            data,
            timestamp: 0,
        }
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Touch down at a window position
    pub fn touch_down(x: f32, y: f32, pointer: PointerKind) -> Self {
        Self::new(event_types::TOUCH_DOWN, EventData::Touch { x, y, pointer })
    }

    /// Touch up at a window position
    pub fn touch_up(x: f32, y: f32, pointer: PointerKind) -> Self {
        Self::new(event_types::TOUCH_UP, EventData::Touch { x, y, pointer })
    }

    pub fn pan(
        event_type: EventType,
        translation: (f32, f32),
        absolute: (f32, f32),
        pointer: PointerKind,
    ) -> Self {
        Self::new(
            event_type,
            EventData::Pan {
                translation_x: translation.0,
                translation_y: translation.1,
                absolute_x: absolute.0,
                absolute_y: absolute.1,
                pointer,
            },
        )
    }

    /// The pointer kind carried by this event, if any
    pub fn pointer(&self) -> Option<PointerKind> {
        match self.data {
            EventData::Touch { pointer, .. } | EventData::Pan { pointer, .. } => Some(pointer),
            _ => None,
        }
    }
}
