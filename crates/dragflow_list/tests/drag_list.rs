//! Integration tests for the draggable list
//!
//! These tests drive a list the way a host would:
//! - Gesture events in, per-frame ticks, layout and scroll reports
//! - Consumer events drained from the inbox and checked for order
//! - Inner and outer auto-scroll observed through fake scroll targets

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use dragflow_list::{
    event_types, DragEnd, DragListCallbacks, DragListConfig, DragListEvent, DraggableList, Event,
    Inbox, Layout, OuterScrollContainer, PointerKind, Rect, ScrollTarget,
};

const ROW: f32 = 50.0;
const FRAME: f32 = 1.0 / 60.0;

// ── Fakes ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ScrollLog {
    scrolls: Vec<f32>,
    scroll_enabled: Vec<bool>,
}

#[derive(Clone, Default)]
struct FakeScroll(Rc<RefCell<ScrollLog>>);

impl ScrollTarget for FakeScroll {
    fn scroll_to(&mut self, offset: f32, _animated: bool) {
        self.0.borrow_mut().scrolls.push(offset);
    }
}

impl OuterScrollContainer for FakeScroll {
    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().scroll_enabled.push(enabled);
    }

    fn measure_in_window(&self) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, 400.0, 800.0))
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────

struct Harness {
    list: DraggableList<u32, u32>,
    inbox: Inbox<DragListEvent<u32>>,
    inner: FakeScroll,
    outer: FakeScroll,
}

impl Harness {
    /// `rows` rows of 50px in a 500px viewport
    fn new(rows: u32) -> Self {
        Self::with_config(rows, DragListConfig::default())
    }

    fn with_config(rows: u32, config: DragListConfig) -> Self {
        let inner = FakeScroll::default();
        let outer = FakeScroll::default();
        let (mut list, inbox) = DraggableList::builder()
            .data((0..rows).collect())
            .key_extractor(|item: &u32, _| *item)
            .config(config)
            .scroll_target(inner.clone())
            .outer_container(outer.clone(), Default::default())
            .build()
            .unwrap();

        list.on_container_layout(Layout::new(0.0, 0.0, 400.0, 500.0));
        list.on_content_size_change(400.0, rows as f32 * ROW);
        for i in 0..rows {
            list.on_cell_layout(i, i as f32 * ROW, ROW);
        }
        inbox.drain().for_each(drop);

        Self {
            list,
            inbox,
            inner,
            outer,
        }
    }

    fn grab(&mut self, key: u32, pointer: PointerKind) -> bool {
        let y = key as f32 * ROW + ROW / 2.0;
        self.list.handle_event(&Event::touch_down(10.0, y, pointer));
        let grabbed = self.list.drag(&key);
        self.list
            .handle_event(&Event::pan(event_types::PAN_BEGIN, (0.0, 0.0), (10.0, y), pointer));
        grabbed
    }

    fn pan_to(&mut self, key: u32, translation: f32) {
        let y = key as f32 * ROW + ROW / 2.0 + translation;
        self.list.handle_event(&Event::pan(
            event_types::PAN_UPDATE,
            (0.0, translation),
            (10.0, y),
            PointerKind::Touch,
        ));
    }

    fn drop_at(&mut self, key: u32, translation: f32) {
        let y = key as f32 * ROW + ROW / 2.0 + translation;
        self.list.handle_event(&Event::pan(
            event_types::PAN_END,
            (0.0, translation),
            (10.0, y),
            PointerKind::Touch,
        ));
        self.list
            .handle_event(&Event::touch_up(10.0, y, PointerKind::Touch));
    }

    fn run_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.list.frame(FRAME);
        }
    }

    /// Frame until the settle animation finishes
    fn settle(&mut self) {
        for _ in 0..600 {
            if !self.list.frame(FRAME) {
                return;
            }
        }
        panic!("drag never settled");
    }

    fn events(&self) -> Vec<DragListEvent<u32>> {
        self.inbox.drain().collect()
    }
}

fn drag_ends(events: &[DragListEvent<u32>]) -> Vec<&DragEnd<u32>> {
    events
        .iter()
        .filter_map(|event| match event {
            DragListEvent::DragEnd(end) => Some(end),
            _ => None,
        })
        .collect()
}

// ── Lifecycle ────────────────────────────────────────────────────────────

#[test]
fn test_release_without_movement_commits_in_place() {
    let mut h = Harness::new(5);
    assert!(h.grab(2, PointerKind::Touch));
    h.list
        .handle_event(&Event::touch_up(10.0, 125.0, PointerKind::Touch));

    assert_eq!(
        h.events(),
        vec![
            DragListEvent::DragBegin(2),
            DragListEvent::Release(2),
            DragListEvent::DragEnd(DragEnd {
                from: 2,
                to: 2,
                data: vec![0, 1, 2, 3, 4]
            }),
        ]
    );
    assert!(!h.list.session().is_active());
}

#[test]
fn test_drag_down_and_drop() {
    let mut h = Harness::new(5);
    h.grab(0, PointerKind::Touch);
    h.pan_to(0, 110.0);
    h.drop_at(0, 110.0);
    h.settle();

    assert_eq!(
        h.events(),
        vec![
            DragListEvent::DragBegin(0),
            DragListEvent::PlaceholderIndexChange(2),
            DragListEvent::Release(0),
            DragListEvent::DragEnd(DragEnd {
                from: 0,
                to: 2,
                data: vec![1, 2, 0, 3, 4]
            }),
        ]
    );
}

#[test]
fn test_drag_up_and_drop() {
    let mut h = Harness::new(5);
    h.grab(4, PointerKind::Touch);
    h.pan_to(4, -140.0);
    h.drop_at(4, -140.0);
    h.settle();

    let events = h.events();
    let ends = drag_ends(&events);
    assert_eq!(ends.len(), 1);
    assert_eq!((ends[0].from, ends[0].to), (4, 1));
    assert_eq!(ends[0].data, vec![0, 4, 1, 2, 3]);
}

#[test]
fn test_settle_lands_on_placeholder() {
    let mut h = Harness::new(5);
    h.grab(0, PointerKind::Touch);
    h.pan_to(0, 110.0);
    h.drop_at(0, 110.0);

    let placeholder = h.list.placeholder_offset();
    assert_eq!(placeholder, 100.0);
    h.run_frames(5);
    // Input is frozen while settling
    h.pan_to(0, 0.0);
    assert_eq!(h.list.session().spacer_index(), Some(2));
    h.settle();
    assert!(!h.list.session().is_active());
}

#[test]
fn test_release_precedes_drag_end_exactly_once() {
    let mut h = Harness::new(6);
    h.grab(1, PointerKind::Touch);
    for step in 1..=8 {
        h.pan_to(1, step as f32 * 20.0);
    }
    h.drop_at(1, 160.0);
    h.settle();
    h.run_frames(30);

    let events = h.events();
    let release = events
        .iter()
        .position(|e| matches!(e, DragListEvent::Release(_)))
        .unwrap();
    let end = events
        .iter()
        .position(|e| matches!(e, DragListEvent::DragEnd(_)))
        .unwrap();
    assert!(release < end);
    assert_eq!(drag_ends(&events).len(), 1);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, DragListEvent::Release(_)))
            .count(),
        1
    );
}

#[test]
fn test_placeholder_change_dedup() {
    let mut h = Harness::new(5);
    h.grab(0, PointerKind::Touch);
    for translation in [26.0, 30.0, 35.0, 40.0, 49.0, 60.0] {
        h.pan_to(0, translation);
        h.run_frames(1);
    }
    let changes: Vec<_> = h
        .events()
        .into_iter()
        .filter(|e| matches!(e, DragListEvent::PlaceholderIndexChange(_)))
        .collect();
    assert_eq!(changes, vec![DragListEvent::PlaceholderIndexChange(1)]);
}

#[test]
fn test_single_active_drag() {
    let mut h = Harness::new(4);
    assert!(h.grab(0, PointerKind::Touch));
    assert!(!h.list.drag(&1));
    assert!(h.list.is_active(&0));
    assert!(!h.list.is_active(&1));
    assert_eq!(h.list.session().active_index(), Some(0));
}

// ── Recovery ─────────────────────────────────────────────────────────────

#[test]
fn test_data_reorder_mid_drag_resets_silently() {
    let mut h = Harness::new(4);
    h.grab(1, PointerKind::Touch);
    h.pan_to(1, 60.0);
    h.events();

    h.list.set_data(vec![3, 2, 1, 0]);
    assert!(!h.list.session().is_active());
    assert!(h.list.list_scroll_enabled());

    h.drop_at(1, 60.0);
    h.run_frames(60);
    assert!(drag_ends(&h.events()).is_empty());
    // Outer lock released by the reset
    assert_eq!(h.outer.0.borrow().scroll_enabled.last(), Some(&true));
}

#[test]
fn test_data_reorder_while_settling_resets_silently() {
    let mut h = Harness::new(4);
    h.grab(0, PointerKind::Touch);
    h.pan_to(0, 80.0);
    h.drop_at(0, 80.0);
    h.run_frames(2);

    h.list.set_data(vec![0, 1, 3, 2]);
    h.run_frames(120);
    assert!(drag_ends(&h.events()).is_empty());
    assert!(!h.list.session().is_active());
}

#[test]
fn test_same_keys_do_not_reset() {
    let (mut list, inbox) = DraggableList::builder()
        .data(vec![(1u32, 'a'), (2, 'b')])
        .key_extractor(|item: &(u32, char), _| item.0)
        .build()
        .unwrap();
    list.on_cell_layout(1, 0.0, ROW);
    list.on_cell_layout(2, ROW, ROW);

    assert!(list.drag(&1));
    list.set_data(vec![(1, 'x'), (2, 'y')]);
    assert!(list.is_active(&1));

    list.handle_event(&Event::touch_up(0.0, 0.0, PointerKind::Touch));
    let ends: Vec<_> = inbox
        .drain()
        .filter_map(|e| match e {
            DragListEvent::DragEnd(end) => Some(end),
            _ => None,
        })
        .collect();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].data, vec![(1, 'x'), (2, 'y')]);
}

#[test]
fn test_render_report_does_not_count_as_reorder() {
    let mut h = Harness::new(3);
    h.grab(0, PointerKind::Touch);

    // Row 2 reported at index 0 before the data caught up
    h.list.on_row_rendered(2, 0);
    h.list.set_data(vec![0, 1, 2]);
    assert!(h.list.is_active(&0));
    assert_eq!(h.list.keys(), &[0, 1, 2]);

    h.pan_to(0, 60.0);
    h.drop_at(0, 60.0);
    h.settle();
    let events = h.events();
    let ends = drag_ends(&events);
    assert_eq!(ends.len(), 1);
    assert_eq!((ends[0].from, ends[0].to), (0, 1));
}

#[test]
fn test_disable_mid_drag_abandons_without_commit() {
    let mut h = Harness::new(4);
    h.grab(0, PointerKind::Touch);
    h.pan_to(0, 80.0);

    h.list.set_disabled(true);
    assert!(h.list.is_disabled());
    assert!(!h.list.session().is_active());

    // The rest of the gesture is ignored
    h.pan_to(0, 120.0);
    h.drop_at(0, 120.0);
    h.run_frames(60);
    assert!(drag_ends(&h.events()).is_empty());
    assert!(!h.list.drag(&1));

    h.list.set_disabled(false);
    assert!(h.grab(1, PointerKind::Touch));
}

#[test]
fn test_unknown_key_is_ignored() {
    let mut h = Harness::new(3);
    assert!(!h.list.drag(&42));
    assert!(h.events().is_empty());
}

// ── Auto-scroll ──────────────────────────────────────────────────────────

#[test]
fn test_inner_autoscroll_follows_dragged_item() {
    let mut h = Harness::new(40);
    h.grab(2, PointerKind::Touch);
    // Trailing edge 10px above the viewport bottom
    h.pan_to(2, 340.0);
    h.run_frames(10);

    let scrolls = h.inner.0.borrow().scrolls.clone();
    assert!(!scrolls.is_empty());
    assert!(scrolls.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(h.list.session().scroll_offset(), *scrolls.last().unwrap());
    // The scrolled distance pushes the placeholder further down
    assert!(h.list.session().spacer_index().unwrap() > 9);
}

#[test]
fn test_touch_up_before_pan_end_commits_same_index() {
    fn drag_with_autoscroll(lift_first: bool) -> (usize, usize) {
        let mut h = Harness::new(40);
        h.grab(8, PointerKind::Touch);
        h.pan_to(8, 440.0);
        h.run_frames(6);
        assert!(h.list.session().scroll_offset() > 0.0);

        let y = 8.0 * ROW + ROW / 2.0 + 440.0;
        let up = Event::touch_up(10.0, y, PointerKind::Touch);
        let end = Event::pan(event_types::PAN_END, (0.0, 440.0), (10.0, y), PointerKind::Touch);
        if lift_first {
            h.list.handle_event(&up);
            h.list.handle_event(&end);
        } else {
            h.list.handle_event(&end);
            h.list.handle_event(&up);
        }
        h.settle();

        let events = h.events();
        let ends = drag_ends(&events);
        assert_eq!(ends.len(), 1);
        (ends[0].from, ends[0].to)
    }

    let end_first = drag_with_autoscroll(false);
    let lift_first = drag_with_autoscroll(true);
    assert_eq!(end_first, lift_first);
    // Travel includes the scrolled distance, not just the finger's 440px
    assert!(end_first.1 > 17);
}

#[test]
fn test_inner_autoscroll_respects_top() {
    let mut h = Harness::new(40);
    h.grab(0, PointerKind::Touch);
    h.pan_to(0, -20.0);
    h.run_frames(30);
    assert!(h.inner.0.borrow().scrolls.is_empty());
    assert_eq!(h.list.session().scroll_offset(), 0.0);
}

#[test]
fn test_inner_autoscroll_respects_bottom() {
    let mut h = Harness::new(40);
    h.list.on_scroll(1500.0);
    h.list.on_cell_layout(39, 1950.0, ROW);
    h.list.handle_event(&Event::touch_down(10.0, 475.0, PointerKind::Touch));
    h.list.drag(&39);
    h.list.handle_event(&Event::pan(
        event_types::PAN_BEGIN,
        (0.0, 0.0),
        (10.0, 475.0),
        PointerKind::Touch,
    ));
    h.list.handle_event(&Event::pan(
        event_types::PAN_UPDATE,
        (0.0, 20.0),
        (10.0, 495.0),
        PointerKind::Touch,
    ));
    h.run_frames(30);
    assert!(h.inner.0.borrow().scrolls.is_empty());
    assert_eq!(h.list.session().scroll_offset(), 1500.0);
}

#[test]
fn test_scroll_reports_are_forwarded() {
    let mut h = Harness::new(3);
    h.list.on_scroll(40.0);
    assert_eq!(h.events(), vec![DragListEvent::ScrollOffsetChange(40.0)]);
}

#[test]
fn test_outer_container_locked_during_touch_drag() {
    let mut h = Harness::new(5);
    h.grab(0, PointerKind::Touch);
    assert_eq!(h.outer.0.borrow().scroll_enabled, vec![false]);

    h.list
        .handle_event(&Event::touch_up(10.0, 25.0, PointerKind::Touch));
    assert_eq!(h.outer.0.borrow().scroll_enabled, vec![false, true]);
}

#[test]
fn test_outer_container_not_locked_for_mouse() {
    let mut h = Harness::new(5);
    h.grab(0, PointerKind::Mouse);
    assert!(h.outer.0.borrow().scroll_enabled.is_empty());
}

#[test]
fn test_outer_autoscroll_near_container_edge() {
    let config = DragListConfig::default().drag_item_overflow(true);
    let mut h = Harness::with_config(5, config);
    h.list.on_outer_scroll(0.0);
    h.grab(0, PointerKind::Touch);

    // Pointer 10px above the outer container's bottom edge at 800
    h.list.handle_event(&Event::pan(
        event_types::PAN_UPDATE,
        (0.0, 765.0),
        (10.0, 790.0),
        PointerKind::Touch,
    ));
    h.run_frames(1);
    let scrolls = h.outer.0.borrow().scrolls.clone();
    assert_eq!(scrolls.len(), 1);
    assert!(scrolls[0] > 0.0);

    // The container is already at its end
    h.list.on_outer_scroll(0.0);
    h.run_frames(5);
    assert_eq!(h.outer.0.borrow().scrolls.len(), 1);
}

#[test]
fn test_outer_scroll_moves_placeholder() {
    let mut h = Harness::new(10);
    h.list.on_outer_scroll(0.0);
    h.grab(1, PointerKind::Touch);
    h.pan_to(1, 1.0);
    assert_eq!(h.list.hover_offset(), 51.0);
    assert_eq!(h.list.session().spacer_index(), Some(1));

    // The ancestor scrolled under a stationary finger
    h.list.on_outer_scroll(150.0);
    h.run_frames(2);
    assert_eq!(h.list.session().outer_scroll_offset(), 150.0);
    assert_eq!(h.list.hover_offset(), 201.0);
    assert_eq!(h.list.session().spacer_index(), Some(4));

    h.drop_at(1, 1.0);
    h.settle();
    let events = h.events();
    let ends = drag_ends(&events);
    assert_eq!(ends.len(), 1);
    assert_eq!((ends[0].from, ends[0].to), (1, 4));
}

#[test]
fn test_drop_restores_outer_scroll() {
    let outer = {
        let mut h = Harness::new(3);
        h.grab(0, PointerKind::Touch);
        h.outer.clone()
    };
    assert_eq!(outer.0.borrow().scroll_enabled.last(), Some(&true));
}

// ── Callbacks ────────────────────────────────────────────────────────────

#[test]
fn test_callbacks_receive_drag_end() {
    let mut h = Harness::new(3);
    let ends = Arc::new(Mutex::new(Vec::new()));
    let sink = ends.clone();
    let mut callbacks = DragListCallbacks::new().on_drag_end(move |end: DragEnd<u32>| {
        sink.lock().unwrap().push((end.from, end.to, end.data));
    });

    h.grab(2, PointerKind::Touch);
    h.pan_to(2, -100.0);
    h.drop_at(2, -100.0);
    h.settle();
    callbacks.pump(&h.inbox);

    assert_eq!(*ends.lock().unwrap(), vec![(2, 0, vec![2, 0, 1])]);
}
