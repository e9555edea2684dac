//! Drag state machine
//!
//! Owns the single drag lifecycle:
//!
//! ```text
//! Idle --BEGIN--> Armed --MOVE--> Dragging --RELEASE--> Releasing --SETTLED--> Idle
//!                   \______________RELEASE_____________/
//! ```
//!
//! While `Releasing` the finger no longer drives the cell: a spring animates
//! `touch_translate` onto the placeholder slot and the reorder is committed
//! when it comes to rest. A release with no recorded movement commits at
//! once. Any phase returns to `Idle` on `RESET` (data replaced, disabled,
//! explicit cancel) without committing.

use std::hash::Hash;

use dragflow_animation::{AnimationScheduler, Spring, SpringConfig, SpringId};
use dragflow_core::fsm::{EventId, StateTransitions};
use smallvec::SmallVec;

use crate::config::DragListConfig;
use crate::key_map::KeyIndexMap;
use crate::measure::MeasurementRegistry;
use crate::session::DragSession;

/// Drag lifecycle events
pub mod drag_events {
    use dragflow_core::fsm::EventId;

    pub const BEGIN: EventId = 1;
    pub const MOVE: EventId = 2;
    pub const RELEASE: EventId = 3;
    pub const SETTLED: EventId = 4;
    pub const RESET: EventId = 5;
}

/// Drag lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    /// No drag in progress
    #[default]
    Idle,
    /// An item was grabbed but the pointer has not moved yet
    Armed,
    /// The pointer is moving the item
    Dragging,
    /// Input is frozen while the item settles into its slot
    Releasing,
}

impl DragPhase {
    /// A drag exists (any phase but Idle)
    pub fn is_active(&self) -> bool {
        !matches!(self, DragPhase::Idle)
    }

    /// Gesture input is ignored in this phase
    pub fn is_frozen(&self) -> bool {
        matches!(self, DragPhase::Releasing)
    }
}

impl StateTransitions for DragPhase {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use drag_events::*;
        match (self, event) {
            (DragPhase::Idle, BEGIN) => Some(DragPhase::Armed),
            (DragPhase::Armed, MOVE) => Some(DragPhase::Dragging),
            (DragPhase::Dragging, MOVE) => Some(DragPhase::Dragging),
            (DragPhase::Armed | DragPhase::Dragging, RELEASE) => Some(DragPhase::Releasing),
            (DragPhase::Releasing, SETTLED) => Some(DragPhase::Idle),
            (_, RESET) => Some(DragPhase::Idle),
            _ => None,
        }
    }
}

/// Side effects produced by the state machine, in the order they occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSignal {
    Begin(usize),
    PlaceholderChange(usize),
    Release(usize),
    Commit { from: usize, to: usize },
}

/// Signals collected during one call
pub type DragSignals = SmallVec<[DragSignal; 4]>;

/// Read-only view of the bookkeeping the state machine consults
pub struct DragContext<'a, K> {
    pub registry: &'a MeasurementRegistry<K>,
    pub keys: &'a KeyIndexMap<K>,
    pub config: &'a DragListConfig,
}

// ============================================================================
// Derived geometry
// ============================================================================

/// Dragged item's leading edge in list content coordinates
pub fn hover_offset<K>(session: &DragSession<K>, config: &DragListConfig) -> f32 {
    let raw = session.active_cell.offset + session.touch_translate + session.auto_scroll_distance();
    if config.drag_item_overflow || !session.is_dragging_cell() || session.container_size <= 0.0
    {
        return raw;
    }

    let lower = session.scroll_offset;
    let upper = session.scroll_offset + session.container_size - session.active_cell.size;
    if upper < lower {
        return raw;
    }
    raw.clamp(lower, upper)
}

/// Drop target for a hover position.
///
/// Scans outward from the active index. A row before the active item is
/// crossed once the hover's leading edge moves above the row's midpoint; a
/// row after it once the trailing edge moves below its midpoint. The scan
/// stops at the first row not crossed or not yet laid out.
pub fn compute_spacer_index<K: Eq + Hash + Clone>(
    session: &DragSession<K>,
    ctx: &DragContext<'_, K>,
    hover: f32,
) -> Option<usize> {
    let active = session.active_index?;
    let leading = hover;
    let trailing = hover + session.active_cell.size;
    let mut spacer = active;

    for i in (0..active).rev() {
        let Some(key) = ctx.keys.key_at(i) else {
            break;
        };
        let row = ctx.registry.get_or_default(key);
        if !row.is_laid_out() || leading >= row.midpoint() {
            break;
        }
        spacer = i;
    }
    if spacer != active {
        return Some(spacer);
    }

    for i in active + 1..ctx.keys.len() {
        let Some(key) = ctx.keys.key_at(i) else {
            break;
        };
        let row = ctx.registry.get_or_default(key);
        if !row.is_laid_out() || trailing <= row.midpoint() {
            break;
        }
        spacer = i;
    }
    Some(spacer)
}

/// Where the dragged item's leading edge lands if released now
pub fn placeholder_offset<K: Eq + Hash + Clone>(
    session: &DragSession<K>,
    ctx: &DragContext<'_, K>,
) -> f32 {
    let (Some(active), Some(spacer)) = (session.active_index, session.spacer_index) else {
        return session.active_cell.offset;
    };
    let row_at = |index: usize| {
        ctx.keys
            .key_at(index)
            .map(|key| ctx.registry.get_or_default(key))
            .unwrap_or_default()
    };

    if spacer < active {
        row_at(spacer).offset
    } else if spacer > active {
        row_at(spacer).end() - session.active_cell.size
    } else {
        session.active_cell.offset
    }
}

/// How far a non-active row at `index` shifts to open the placeholder gap
pub fn cell_translate<K>(session: &DragSession<K>, index: usize) -> f32 {
    let (Some(active), Some(spacer)) = (session.active_index, session.spacer_index) else {
        return 0.0;
    };
    let size = session.active_cell.size;
    if index > active && index <= spacer {
        -size
    } else if index < active && index >= spacer {
        size
    } else {
        0.0
    }
}

// ============================================================================
// State machine
// ============================================================================

/// Drives a [`DragSession`] through its lifecycle
pub struct DragStateMachine {
    scheduler: AnimationScheduler,
    settle: Option<SpringId>,
    spring: SpringConfig,
}

impl DragStateMachine {
    pub fn new(spring: SpringConfig) -> Self {
        Self {
            scheduler: AnimationScheduler::new(),
            settle: None,
            spring,
        }
    }

    /// Whether the settle spring is running
    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Grab the item with `key`. No-op when disabled, when a drag is already
    /// in progress, or when the key is not part of the data.
    pub fn begin_drag<K: Eq + Hash + Clone + std::fmt::Debug>(
        &mut self,
        session: &mut DragSession<K>,
        ctx: &DragContext<'_, K>,
        key: &K,
        out: &mut DragSignals,
    ) -> bool {
        if session.disabled {
            tracing::trace!("drag: begin ignored, list disabled");
            return false;
        }
        if session.is_active() {
            tracing::debug!("drag: begin ignored, {:?} already active", session.active_key);
            return false;
        }
        let Some(index) = ctx.keys.index_of(key) else {
            tracing::debug!("drag: begin ignored, unknown key {:?}", key);
            return false;
        };

        session.active_cell = ctx.registry.get_or_default(key);
        session.active_index = Some(index);
        session.spacer_index = Some(index);
        session.active_key = Some(key.clone());
        session.scroll_offset_at_start = session.scroll_offset;
        session.outer_scroll_offset_at_start = session.outer_scroll_offset;
        session.phase.send(drag_events::BEGIN);

        tracing::debug!(
            "drag: begin key={:?} index={} cell=({:.1}, {:.1})",
            key,
            index,
            session.active_cell.offset,
            session.active_cell.size
        );
        out.push(DragSignal::Begin(index));
        true
    }

    /// Apply the pan translation for this frame
    pub fn update_translate<K: Eq + Hash + Clone>(
        &mut self,
        session: &mut DragSession<K>,
        ctx: &DragContext<'_, K>,
        translation: f32,
        out: &mut DragSignals,
    ) {
        if session.phase.is_frozen() {
            return;
        }
        session.touch_translate = translation;
        if !session.is_active() {
            return;
        }
        session.phase.send(drag_events::MOVE);
        self.refresh_spacer(session, ctx, out);
    }

    /// Recompute the drop target from the current hover position
    pub fn refresh_spacer<K: Eq + Hash + Clone>(
        &mut self,
        session: &mut DragSession<K>,
        ctx: &DragContext<'_, K>,
        out: &mut DragSignals,
    ) {
        if !session.is_active() || session.phase.is_frozen() {
            return;
        }
        let hover = hover_offset(session, ctx.config);
        let next = compute_spacer_index(session, ctx, hover);
        set_spacer_index(session, next, out);
    }

    /// Pan ended with the given axis translation
    pub fn release<K: Eq + Hash + Clone>(
        &mut self,
        session: &mut DragSession<K>,
        ctx: &DragContext<'_, K>,
        translation: f32,
        out: &mut DragSignals,
    ) {
        if session.phase.is_frozen() {
            return;
        }

        session.touch_translate = translation;
        if session.is_active() {
            self.refresh_spacer(session, ctx, out);
            let hover = hover_offset(session, ctx.config);
            session.touch_translate = hover - session.active_cell.offset;
        }
        session.touch_active = false;

        let Some(active) = session.active_index else {
            return;
        };
        if session.disabled {
            return;
        }

        session.phase.send(drag_events::RELEASE);
        out.push(DragSignal::Release(active));

        let target = placeholder_offset(session, ctx) - session.active_cell.offset;
        let mut spring = Spring::new(self.spring, session.touch_translate);
        spring.set_target(target);
        tracing::debug!(
            "drag: release index={} spacer={:?} settle {:.1} -> {:.1}",
            active,
            session.spacer_index,
            session.touch_translate,
            target
        );
        self.settle = Some(self.scheduler.add_spring(spring));
    }

    /// Touch lifted without any recorded movement. Commits immediately if a
    /// drag is armed. Returns true if a commit was produced.
    pub fn release_without_movement<K>(
        &mut self,
        session: &mut DragSession<K>,
        out: &mut DragSignals,
    ) -> bool {
        if session.touch_translate != 0.0 || session.disabled || session.phase.is_frozen() {
            return false;
        }
        let Some(active) = session.active_index else {
            return false;
        };

        tracing::debug!("drag: released without movement at {}", active);
        session.phase.send(drag_events::RELEASE);
        out.push(DragSignal::Release(active));
        self.commit(session, out);
        true
    }

    /// Step the settle spring and commit once it rests
    pub fn tick<K>(&mut self, session: &mut DragSession<K>, dt: f32, out: &mut DragSignals) {
        let Some(id) = self.settle else {
            return;
        };
        self.scheduler.step(dt);

        let Some(spring) = self.scheduler.get_spring(id) else {
            self.settle = None;
            return;
        };
        session.touch_translate = spring.value();
        if spring.is_settled() {
            self.scheduler.remove_spring(id);
            self.settle = None;
            self.commit(session, out);
        }
    }

    /// Abandon the drag without committing
    pub fn cancel<K>(&mut self, session: &mut DragSession<K>) {
        if let Some(id) = self.settle.take() {
            self.scheduler.remove_spring(id);
        }
        if session.is_active() {
            tracing::debug!("drag: cancelled at {:?}", session.active_index);
        }
        session.phase.send(drag_events::RESET);
        session.reset();
    }

    fn commit<K>(&mut self, session: &mut DragSession<K>, out: &mut DragSignals) {
        if let (Some(from), Some(to)) = (session.active_index, session.spacer_index) {
            session.phase.send(drag_events::SETTLED);
            tracing::debug!("drag: commit {} -> {}", from, to);
            out.push(DragSignal::Commit { from, to });
        }
        session.reset();
    }
}

/// Store a new drop target, signalling only real changes between two
/// valid indices
fn set_spacer_index<K>(session: &mut DragSession<K>, next: Option<usize>, out: &mut DragSignals) {
    let prev = session.spacer_index;
    session.spacer_index = next;
    if let (Some(prev), Some(next)) = (prev, next) {
        if prev != next {
            tracing::trace!("drag: placeholder {} -> {}", prev, next);
            out.push(DragSignal::PlaceholderChange(next));
        }
    }
}
