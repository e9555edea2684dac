//! Draggable list
//!
//! Owns one drag session and everything that feeds it. The host forwards
//! gesture events, layout reports and scroll offsets, calls [`DraggableList::frame`]
//! once per display frame, and drains the returned inbox on the application
//! side.
//!
//! ```text
//! gesture events ──► GestureAdapter ──► DragStateMachine ──► DragSession
//!                                                               │
//!          frame(dt): settle → spacer → inner scroll → outer scroll → layout timer
//!                                                               │
//!                                      Mailbox<DragListEvent> ◄─┘
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use dragflow_core::events::{event_types, Event, EventData};
use dragflow_core::mailbox::{self, Inbox, Mailbox};

use crate::autoscroll::InnerAutoScroll;
use crate::callbacks::DragListEvent;
use crate::commit::{reorder, DragEnd};
use crate::config::{Axis, DragListConfig, LAYOUT_ANIMATION_REENABLE_DELAY};
use crate::drag::{self, DragContext, DragSignal, DragSignals, DragStateMachine};
use crate::error::{DragListError, Result};
use crate::gesture::{GestureAdapter, GestureSignal, PanRecognizerParams};
use crate::host::{Layout, NoScroll, OuterScrollContainer, ScrollTarget};
use crate::key_map::KeyIndexMap;
use crate::measure::MeasurementRegistry;
use crate::outer_scroll::OuterAutoScroll;
use crate::session::DragSession;

/// Maps an item and its index to its stable key
pub type KeyExtractor<T, K> = Box<dyn Fn(&T, usize) -> K + Send>;

// ============================================================================
// Layout Animation Gate
// ============================================================================

/// Suppresses layout animations during a drag and for a short delay after it
#[derive(Debug, Default)]
struct LayoutAnimationGate {
    allowed: bool,
    suppressed: bool,
    reenable_in: Option<f32>,
}

impl LayoutAnimationGate {
    fn new(allowed: bool) -> Self {
        Self {
            allowed,
            ..Default::default()
        }
    }

    fn suppress(&mut self) {
        self.suppressed = true;
        self.reenable_in = None;
    }

    fn schedule_reenable(&mut self) {
        if self.suppressed {
            self.reenable_in = Some(LAYOUT_ANIMATION_REENABLE_DELAY);
        }
    }

    fn tick(&mut self, dt: f32) {
        if let Some(remaining) = self.reenable_in {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.suppressed = false;
                self.reenable_in = None;
            } else {
                self.reenable_in = Some(remaining);
            }
        }
    }

    fn is_pending(&self) -> bool {
        self.reenable_in.is_some()
    }

    fn is_enabled(&self) -> bool {
        self.allowed && !self.suppressed
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`DraggableList`]
pub struct DraggableListBuilder<T, K> {
    data: Vec<T>,
    key_extractor: Option<KeyExtractor<T, K>>,
    config: DragListConfig,
    scroll_target: Option<Box<dyn ScrollTarget>>,
    outer: Option<(Box<dyn OuterScrollContainer>, Axis)>,
    disabled: bool,
}

impl<T, K> Default for DraggableListBuilder<T, K> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            key_extractor: None,
            config: DragListConfig::default(),
            scroll_target: None,
            outer: None,
            disabled: false,
        }
    }
}

impl<T: Clone, K: Eq + Hash + Clone + Debug> DraggableListBuilder<T, K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, data: Vec<T>) -> Self {
        self.data = data;
        self
    }

    /// Required: stable key for each item
    pub fn key_extractor(mut self, f: impl Fn(&T, usize) -> K + Send + 'static) -> Self {
        self.key_extractor = Some(Box::new(f));
        self
    }

    pub fn config(mut self, config: DragListConfig) -> Self {
        self.config = config;
        self
    }

    /// Imperative scroll handle for the list's own viewport
    pub fn scroll_target(mut self, target: impl ScrollTarget + 'static) -> Self {
        self.scroll_target = Some(Box::new(target));
        self
    }

    /// Ancestor scroll container to auto-scroll and lock during drags
    pub fn outer_container(mut self, container: impl OuterScrollContainer + 'static, axis: Axis) -> Self {
        self.outer = Some((Box::new(container), axis));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Validate the configuration and build the list together with the inbox
    /// its events are delivered to
    pub fn build(self) -> Result<(DraggableList<T, K>, Inbox<DragListEvent<T>>)> {
        let key_of = self.key_extractor.ok_or(DragListError::MissingKeyExtractor)?;
        self.config.validate()?;

        let (mailbox, inbox) = mailbox::channel();
        let mut session = DragSession::new();
        session.disabled = self.disabled;

        let mut list = DraggableList {
            config: self.config,
            data: Vec::new(),
            key_of,
            registry: MeasurementRegistry::new(),
            keys: KeyIndexMap::new(),
            session,
            machine: DragStateMachine::new(self.config.animation),
            gesture: GestureAdapter::new(&self.config),
            inner: InnerAutoScroll::new(),
            outer: self
                .outer
                .map(|(container, axis)| OuterAutoScroll::attach(container, axis)),
            list_target: self.scroll_target.unwrap_or_else(|| Box::new(NoScroll)),
            mailbox,
            layout_animation: LayoutAnimationGate::new(self.config.enable_layout_animation),
        };
        list.set_data(self.data);

        tracing::debug!(
            "list: built with {} items, axis={:?}, outer={}",
            list.data.len(),
            list.config.axis,
            list.outer.is_some()
        );
        Ok((list, inbox))
    }
}

// ============================================================================
// Draggable List
// ============================================================================

/// Drag-to-reorder engine for one virtualized list
pub struct DraggableList<T, K> {
    config: DragListConfig,
    data: Vec<T>,
    key_of: KeyExtractor<T, K>,
    registry: MeasurementRegistry<K>,
    keys: KeyIndexMap<K>,
    session: DragSession<K>,
    machine: DragStateMachine,
    gesture: GestureAdapter,
    inner: InnerAutoScroll,
    outer: Option<OuterAutoScroll>,
    list_target: Box<dyn ScrollTarget>,
    mailbox: Mailbox<DragListEvent<T>>,
    layout_animation: LayoutAnimationGate,
}

impl<T: Clone, K: Eq + Hash + Clone + Debug> DraggableList<T, K> {
    pub fn builder() -> DraggableListBuilder<T, K> {
        DraggableListBuilder::new()
    }

    // ------------------------------------------------------------------------
    // Data
    // ------------------------------------------------------------------------

    /// Replace the data sequence. If the ordered keys differ from the current
    /// ones, any drag in progress is dropped without a commit.
    pub fn set_data(&mut self, data: Vec<T>) {
        let next_keys: Vec<K> = data
            .iter()
            .enumerate()
            .map(|(i, item)| (self.key_of)(item, i))
            .collect();

        if !self.keys.same_order(&next_keys) {
            if self.session.is_active() {
                tracing::debug!("list: key order changed mid-drag, resetting");
                self.abandon();
            }
            self.keys.rebuild(&next_keys, |key, _| key.clone());
            self.registry.retain_keys(self.keys.keys());
        }
        self.data = data;
    }

    /// A row was rendered at `index`; patch the key map if it disagrees
    pub fn on_row_rendered(&mut self, key: K, index: usize) {
        if self.keys.index_of(&key) != Some(index) {
            tracing::trace!("list: {:?} rendered at {}", key, index);
            self.keys.set(key, index);
        }
    }

    /// Layout report for one row, in list content coordinates
    pub fn on_cell_layout(&mut self, key: K, offset: f32, size: f32) {
        self.registry.record(key, offset, size);
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn keys(&self) -> &[K] {
        self.keys.keys()
    }

    pub fn config(&self) -> &DragListConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Drag control
    // ------------------------------------------------------------------------

    /// Grab the item with `key`, typically from a long-press handler.
    /// Returns false when the grab was ignored.
    pub fn drag(&mut self, key: &K) -> bool {
        let mut out = DragSignals::new();
        let ctx = DragContext {
            registry: &self.registry,
            keys: &self.keys,
            config: &self.config,
        };
        if !self.machine.begin_drag(&mut self.session, &ctx, key, &mut out) {
            return false;
        }

        self.inner.anchor(self.session.scroll_offset);
        if let Some(outer) = self.outer.as_mut() {
            outer.lock(self.gesture.pointer_kind());
        }
        self.layout_animation.suppress();
        self.dispatch(out);
        true
    }

    /// Disable or re-enable dragging. Disabling drops any drag in progress
    /// without a commit.
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.session.disabled == disabled {
            return;
        }
        self.session.disabled = disabled;
        tracing::debug!("list: disabled={}", disabled);
        if disabled && self.session.is_active() {
            self.abandon();
        }
    }

    /// Drop the current drag without committing
    pub fn cancel(&mut self) {
        if self.session.is_active() {
            self.abandon();
        }
    }

    /// Feed one platform event. Gesture events drive the drag; scroll,
    /// resize and lifecycle events are routed to the matching host report.
    pub fn handle_event(&mut self, event: &Event) {
        match (event.event_type, &event.data) {
            (event_types::SCROLL, EventData::Scroll { offset_x, offset_y }) => {
                self.on_scroll(self.config.axis.pick(*offset_x, *offset_y));
                return;
            }
            (event_types::RESIZE | event_types::MOUNT, _) => {
                self.on_outer_layout();
                return;
            }
            (event_types::UNMOUNT, _) => {
                self.cancel();
                if let Some(outer) = self.outer.as_mut() {
                    outer.unlock();
                }
                return;
            }
            _ => {}
        }

        let Some(signal) = self.gesture.handle(event, self.session.disabled) else {
            return;
        };

        let mut out = DragSignals::new();
        match signal {
            GestureSignal::TouchDown { .. } => {
                self.session.touch_active = true;
                if !self.session.is_active() {
                    self.session.touch_translate = 0.0;
                }
            }
            GestureSignal::TouchUp => {
                self.session.touch_active = false;
                self.update_outer_pointer(None);
                self.machine
                    .release_without_movement(&mut self.session, &mut out);
            }
            GestureSignal::Begin { .. } => {
                self.session.touch_active = true;
            }
            GestureSignal::Update {
                translation,
                pointer,
            } => {
                let ctx = DragContext {
                    registry: &self.registry,
                    keys: &self.keys,
                    config: &self.config,
                };
                self.machine
                    .update_translate(&mut self.session, &ctx, translation, &mut out);
                self.update_outer_pointer(Some(pointer));
            }
            GestureSignal::End { translation } => {
                let ctx = DragContext {
                    registry: &self.registry,
                    keys: &self.keys,
                    config: &self.config,
                };
                self.machine
                    .release(&mut self.session, &ctx, translation, &mut out);
                self.update_outer_pointer(None);
            }
        }
        self.dispatch(out);
    }

    /// Parameters to configure the platform pan recognizer with
    pub fn recognizer_params(&self) -> PanRecognizerParams {
        self.gesture.recognizer_params()
    }

    // ------------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------------

    /// Run one frame. Returns true while anything is still moving or pending
    /// and another frame should be scheduled.
    pub fn frame(&mut self, dt: f32) -> bool {
        let mut out = DragSignals::new();

        self.machine.tick(&mut self.session, dt, &mut out);

        let ctx = DragContext {
            registry: &self.registry,
            keys: &self.keys,
            config: &self.config,
        };
        self.machine.refresh_spacer(&mut self.session, &ctx, &mut out);

        self.inner
            .step(&mut self.session, &self.config, self.list_target.as_mut());

        if let Some(outer) = self.outer.as_mut() {
            outer.step(
                self.session.is_active(),
                self.config.autoscroll_threshold,
                self.config.autoscroll_speed,
            );
        }

        self.dispatch(out);
        self.layout_animation.tick(dt);

        self.session.is_active() || self.machine.is_settling() || self.layout_animation.is_pending()
    }

    // ------------------------------------------------------------------------
    // Host reports
    // ------------------------------------------------------------------------

    /// The list's own scroll offset changed
    pub fn on_scroll(&mut self, offset: f32) {
        self.session.scroll_offset = offset;
        self.mailbox.post(DragListEvent::ScrollOffsetChange(offset));
    }

    /// The outer container's scroll offset changed. Travel along the list
    /// axis moves the list under the finger, so it feeds the hover position.
    pub fn on_outer_scroll(&mut self, offset: f32) {
        let Some(outer) = self.outer.as_mut() else {
            return;
        };
        outer.on_outer_scroll(offset);
        if outer.axis() == self.config.axis {
            self.session.outer_scroll_offset = offset;
        }
    }

    /// The outer container was laid out again or the window resized
    pub fn on_outer_layout(&mut self) {
        if let Some(outer) = self.outer.as_mut() {
            outer.measure();
        }
    }

    /// The list container was laid out (window coordinates)
    pub fn on_container_layout(&mut self, layout: Layout) {
        self.session.container_size = self.config.axis.pick(layout.width, layout.height);
        self.gesture.set_target_bounds(layout);
        self.mailbox.post(DragListEvent::ContainerLayout { layout });
    }

    /// The list's content extent changed
    pub fn on_content_size_change(&mut self, width: f32, height: f32) {
        self.session.content_size = self.config.axis.pick(width, height);
        self.mailbox
            .post(DragListEvent::ContentSizeChange(width, height));
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Whether `key` is the item being dragged
    pub fn is_active(&self, key: &K) -> bool {
        self.session.active_key.as_ref() == Some(key)
    }

    pub fn is_disabled(&self) -> bool {
        self.session.disabled
    }

    /// Whether the list's own scrolling should be enabled right now
    pub fn list_scroll_enabled(&self) -> bool {
        self.config.scroll_enabled && self.session.active_key.is_none()
    }

    pub fn layout_animations_enabled(&self) -> bool {
        self.layout_animation.is_enabled()
    }

    /// Dragged item's leading edge in content coordinates
    pub fn hover_offset(&self) -> f32 {
        drag::hover_offset(&self.session, &self.config)
    }

    /// Leading edge of the slot the item would drop into
    pub fn placeholder_offset(&self) -> f32 {
        let ctx = DragContext {
            registry: &self.registry,
            keys: &self.keys,
            config: &self.config,
        };
        drag::placeholder_offset(&self.session, &ctx)
    }

    /// Shift of the row with `key` to open the placeholder gap. Zero for the
    /// dragged row and for unknown keys.
    pub fn cell_translate(&self, key: &K) -> f32 {
        if self.is_active(key) {
            return 0.0;
        }
        self.keys
            .index_of(key)
            .map_or(0.0, |index| drag::cell_translate(&self.session, index))
    }

    pub fn session(&self) -> &DragSession<K> {
        &self.session
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn update_outer_pointer(&mut self, pointer: Option<(f32, f32)>) {
        let active = self.session.is_active();
        let threshold = self.config.autoscroll_threshold;
        if let Some(outer) = self.outer.as_mut() {
            let axis = outer.axis();
            outer.on_pointer(pointer.map(|(x, y)| axis.pick(x, y)), active, threshold);
        }
    }

    /// Reset without commit
    fn abandon(&mut self) {
        self.machine.cancel(&mut self.session);
        self.end_session();
    }

    /// Session-scoped side effects that outlive no drag
    fn end_session(&mut self) {
        if let Some(outer) = self.outer.as_mut() {
            outer.unlock();
        }
        self.layout_animation.schedule_reenable();
    }

    fn dispatch(&mut self, signals: DragSignals) {
        if signals.is_empty() {
            return;
        }
        let mut batch: SmallVec<[DragListEvent<T>; 4]> = SmallVec::new();
        for signal in signals {
            let event = match signal {
                DragSignal::Begin(index) => DragListEvent::DragBegin(index),
                DragSignal::PlaceholderChange(index) => DragListEvent::PlaceholderIndexChange(index),
                DragSignal::Release(index) => DragListEvent::Release(index),
                DragSignal::Commit { from, to } => {
                    self.end_session();
                    DragListEvent::DragEnd(DragEnd {
                        from,
                        to,
                        data: reorder(&self.data, from, to),
                    })
                }
            };
            batch.push(event);
        }
        self.mailbox.post_all(batch);
    }
}
