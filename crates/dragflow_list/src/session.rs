//! Active drag session
//!
//! The mutable values the frame loop reads and writes every frame. Owned by
//! the list and lent to the drag state machine and both auto-scroll engines.
//! The render layer only reads them.

use crate::drag::DragPhase;
use crate::measure::Measurement;

/// Shared per-list drag/scroll state
#[derive(Debug)]
pub struct DragSession<K> {
    pub(crate) phase: DragPhase,
    pub(crate) active_key: Option<K>,
    pub(crate) active_index: Option<usize>,
    pub(crate) spacer_index: Option<usize>,
    /// Gesture displacement along the axis. During the settle animation this
    /// is driven by the spring instead of the finger.
    pub(crate) touch_translate: f32,
    /// Dragged row's measurement at grab time
    pub(crate) active_cell: Measurement,
    /// List scroll offset along the axis
    pub(crate) scroll_offset: f32,
    /// List scroll offset when the drag began
    pub(crate) scroll_offset_at_start: f32,
    /// Outer container scroll offset along the list axis
    pub(crate) outer_scroll_offset: f32,
    /// Outer container scroll offset when the drag began
    pub(crate) outer_scroll_offset_at_start: f32,
    /// Visible viewport extent of the list
    pub(crate) container_size: f32,
    /// Total content extent of the list
    pub(crate) content_size: f32,
    /// Finger/pointer currently down on the list
    pub(crate) touch_active: bool,
    /// Externally disabled
    pub(crate) disabled: bool,
}

impl<K> Default for DragSession<K> {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
            active_key: None,
            active_index: None,
            spacer_index: None,
            touch_translate: 0.0,
            active_cell: Measurement::default(),
            scroll_offset: 0.0,
            scroll_offset_at_start: 0.0,
            outer_scroll_offset: 0.0,
            outer_scroll_offset_at_start: 0.0,
            container_size: 0.0,
            content_size: 0.0,
            touch_active: false,
            disabled: false,
        }
    }
}

impl<K> DragSession<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Key of the dragged item, None when idle
    pub fn active_key(&self) -> Option<&K> {
        self.active_key.as_ref()
    }

    /// Index of the dragged item at grab time, None when idle
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Current drop target, None when idle
    pub fn spacer_index(&self) -> Option<usize> {
        self.spacer_index
    }

    pub fn touch_translate(&self) -> f32 {
        self.touch_translate
    }

    pub fn active_cell(&self) -> Measurement {
        self.active_cell
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn outer_scroll_offset(&self) -> f32 {
        self.outer_scroll_offset
    }

    pub fn container_size(&self) -> f32 {
        self.container_size
    }

    pub fn content_size(&self) -> f32 {
        self.content_size
    }

    pub fn is_touch_active(&self) -> bool {
        self.touch_active
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// A drag is in progress (armed, dragging or settling)
    pub fn is_active(&self) -> bool {
        self.active_index.is_some()
    }

    /// The gesture still drives the dragged cell: a drag exists and has not
    /// been released. Independent of `touch_active`, since touch-up and
    /// pan-end may arrive in either order.
    pub fn is_dragging_cell(&self) -> bool {
        self.is_active() && !self.phase.is_frozen()
    }

    /// Scroll travelled by the list and its outer container since the drag
    /// began. Folded into the hover position until release, where it is
    /// baked into `touch_translate`.
    pub fn auto_scroll_distance(&self) -> f32 {
        if !self.is_dragging_cell() {
            return 0.0;
        }
        let inner = self.scroll_offset - self.scroll_offset_at_start;
        let outer = self.outer_scroll_offset - self.outer_scroll_offset_at_start;
        inner + outer
    }

    /// Return every drag field to its idle value. Scroll geometry and the
    /// touch/disabled flags are left alone.
    pub(crate) fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.active_key = None;
        self.active_index = None;
        self.spacer_index = None;
        self.touch_translate = 0.0;
        self.active_cell = Measurement::default();
    }
}
