//! Gesture adapter
//!
//! Translates raw pan/touch callbacks from a platform recognizer into the
//! typed signals the drag state machine and auto-scroll engines consume.
//! Touch down/up are tracked separately from the logical pan because a
//! press that never moves produces no pan updates at all.

use dragflow_core::events::{event_types, Event, EventData, PointerKind};

use crate::config::{Axis, DragListConfig, HitSlop};
use crate::host::Rect;

/// Parameters the host hands to its platform pan recognizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanRecognizerParams {
    /// Axis the pan is locked to (also the touch-action hint)
    pub axis: Axis,
    /// Pan activates once the translation leaves `[-d, d]` along the axis
    pub active_offset: Option<(f32, f32)>,
    /// Touch target expansion
    pub hit_slop: Option<HitSlop>,
    /// Minimum travel before activation; Some(0) on fine-pointer platforms
    pub min_distance: Option<f32>,
}

/// Typed gesture signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSignal {
    TouchDown { pointer: PointerKind },
    TouchUp,
    Begin { pointer: PointerKind },
    /// Axis translation since the pan began plus the absolute pointer
    /// position in window coordinates
    Update { translation: f32, pointer: (f32, f32) },
    End { translation: f32 },
}

/// Per-list gesture tracking
#[derive(Debug)]
pub struct GestureAdapter {
    axis: Axis,
    activation_distance: f32,
    hit_slop: HitSlop,
    fine_pointer: bool,
    /// Window bounds of the touch target, when known
    target: Option<Rect>,
    touch_active: bool,
    /// Touch-down landed outside the (expanded) target
    rejected: bool,
    /// Latched for the remainder of the current pan
    gesture_disabled: bool,
    activated: bool,
    translation: f32,
    pointer_position: Option<(f32, f32)>,
    pointer: PointerKind,
}

impl GestureAdapter {
    pub fn new(config: &DragListConfig) -> Self {
        Self {
            axis: config.axis,
            activation_distance: config.activation_distance,
            hit_slop: config.drag_hit_slop,
            fine_pointer: config.fine_pointer,
            target: None,
            touch_active: false,
            rejected: false,
            gesture_disabled: false,
            activated: false,
            translation: 0.0,
            pointer_position: None,
            pointer: PointerKind::Touch,
        }
    }

    /// Recognizer configuration matching this adapter
    pub fn recognizer_params(&self) -> PanRecognizerParams {
        PanRecognizerParams {
            axis: self.axis,
            active_offset: (self.activation_distance > 0.0)
                .then_some((-self.activation_distance, self.activation_distance)),
            hit_slop: (!self.hit_slop.is_none()).then_some(self.hit_slop),
            min_distance: self.fine_pointer.then_some(0.0),
        }
    }

    /// Window bounds used for hit-testing touch-downs
    pub fn set_target_bounds(&mut self, bounds: Rect) {
        self.target = Some(bounds);
    }

    pub fn is_touch_active(&self) -> bool {
        self.touch_active
    }

    pub fn translation(&self) -> f32 {
        self.translation
    }

    /// Absolute pointer position while a pan is live
    pub fn pointer_position(&self) -> Option<(f32, f32)> {
        self.pointer_position
    }

    pub fn pointer_kind(&self) -> PointerKind {
        self.pointer
    }

    /// Whether the current pan has been short-circuited
    pub fn is_gesture_disabled(&self) -> bool {
        self.gesture_disabled
    }

    /// Feed one platform event. `disabled` is the list's disabled flag at
    /// the time of the callback.
    pub fn handle(&mut self, event: &Event, disabled: bool) -> Option<GestureSignal> {
        match (event.event_type, &event.data) {
            (event_types::TOUCH_DOWN, EventData::Touch { x, y, pointer }) => {
                self.touch_down(*x, *y, *pointer, disabled)
            }
            (event_types::TOUCH_UP, _) => Some(self.touch_up()),
            (event_types::PAN_BEGIN, EventData::Pan { pointer, .. }) => {
                self.pan_begin(*pointer, disabled)
            }
            (
                event_types::PAN_UPDATE,
                EventData::Pan {
                    translation_x,
                    translation_y,
                    absolute_x,
                    absolute_y,
                    ..
                },
            ) => self.pan_update(
                self.axis.pick(*translation_x, *translation_y),
                (*absolute_x, *absolute_y),
                disabled,
            ),
            (
                event_types::PAN_END,
                EventData::Pan {
                    translation_x,
                    translation_y,
                    ..
                },
            ) => self.pan_end(self.axis.pick(*translation_x, *translation_y)),
            _ => {
                tracing::trace!("gesture: ignoring event type {}", event.event_type);
                None
            }
        }
    }

    fn touch_down(&mut self, x: f32, y: f32, pointer: PointerKind, disabled: bool) -> Option<GestureSignal> {
        self.rejected = false;
        if disabled {
            return None;
        }
        if let Some(target) = self.target {
            let expanded = Rect::new(
                target.x - self.hit_slop.left,
                target.y - self.hit_slop.top,
                target.width + self.hit_slop.left + self.hit_slop.right,
                target.height + self.hit_slop.top + self.hit_slop.bottom,
            );
            if !expanded.contains(x, y) {
                tracing::trace!("gesture: touch at ({:.1}, {:.1}) outside target", x, y);
                self.rejected = true;
                return None;
            }
        }
        self.touch_active = true;
        self.pointer = pointer;
        Some(GestureSignal::TouchDown { pointer })
    }

    fn touch_up(&mut self) -> GestureSignal {
        self.touch_active = false;
        self.pointer_position = None;
        GestureSignal::TouchUp
    }

    fn pan_begin(&mut self, pointer: PointerKind, disabled: bool) -> Option<GestureSignal> {
        self.gesture_disabled = disabled || self.rejected;
        self.activated = self.activation_distance <= 0.0;
        self.translation = 0.0;
        if self.gesture_disabled {
            return None;
        }
        self.pointer = pointer;
        if !self.touch_active {
            // Some recognizers report the pan before (or without) the raw
            // touch-down callback.
            self.touch_active = true;
        }
        Some(GestureSignal::Begin { pointer })
    }

    fn pan_update(&mut self, translation: f32, absolute: (f32, f32), disabled: bool) -> Option<GestureSignal> {
        if disabled {
            self.gesture_disabled = true;
        }
        if self.gesture_disabled {
            return None;
        }
        if !self.activated {
            if translation.abs() < self.activation_distance {
                return None;
            }
            tracing::trace!("gesture: pan activated at {:.1}", translation);
            self.activated = true;
        }
        self.translation = translation;
        self.pointer_position = Some(absolute);
        Some(GestureSignal::Update {
            translation,
            pointer: absolute,
        })
    }

    fn pan_end(&mut self, translation: f32) -> Option<GestureSignal> {
        self.pointer_position = None;
        let short_circuited = self.gesture_disabled;
        let activated = self.activated;
        self.gesture_disabled = false;
        self.activated = false;
        if short_circuited || !activated {
            return None;
        }
        self.touch_active = false;
        self.translation = translation;
        Some(GestureSignal::End { translation })
    }
}
