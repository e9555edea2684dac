//! Consumer-facing events
//!
//! The frame loop posts [`DragListEvent`]s into a mailbox; the application
//! drains the paired inbox and hands them to [`DragListCallbacks`].

use dragflow_core::mailbox::Inbox;

use crate::commit::DragEnd;
use crate::host::Layout;

/// Observable side effect of the drag list
#[derive(Debug, Clone, PartialEq)]
pub enum DragListEvent<T> {
    DragBegin(usize),
    PlaceholderIndexChange(usize),
    Release(usize),
    DragEnd(DragEnd<T>),
    ScrollOffsetChange(f32),
    ContainerLayout { layout: Layout },
    ContentSizeChange(f32, f32),
}

type Handler<A> = Box<dyn FnMut(A) + Send>;

/// Optional handlers, one per event kind
pub struct DragListCallbacks<T> {
    on_drag_begin: Option<Handler<usize>>,
    on_placeholder_index_change: Option<Handler<usize>>,
    on_release: Option<Handler<usize>>,
    on_drag_end: Option<Handler<DragEnd<T>>>,
    on_scroll_offset_change: Option<Handler<f32>>,
    on_container_layout: Option<Handler<Layout>>,
    on_content_size_change: Option<Handler<(f32, f32)>>,
}

impl<T> Default for DragListCallbacks<T> {
    fn default() -> Self {
        Self {
            on_drag_begin: None,
            on_placeholder_index_change: None,
            on_release: None,
            on_drag_end: None,
            on_scroll_offset_change: None,
            on_container_layout: None,
            on_content_size_change: None,
        }
    }
}

impl<T> DragListCallbacks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_drag_begin(mut self, f: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_drag_begin = Some(Box::new(f));
        self
    }

    pub fn on_placeholder_index_change(mut self, f: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_placeholder_index_change = Some(Box::new(f));
        self
    }

    pub fn on_release(mut self, f: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_release = Some(Box::new(f));
        self
    }

    pub fn on_drag_end(mut self, f: impl FnMut(DragEnd<T>) + Send + 'static) -> Self {
        self.on_drag_end = Some(Box::new(f));
        self
    }

    pub fn on_scroll_offset_change(mut self, f: impl FnMut(f32) + Send + 'static) -> Self {
        self.on_scroll_offset_change = Some(Box::new(f));
        self
    }

    pub fn on_container_layout(mut self, f: impl FnMut(Layout) + Send + 'static) -> Self {
        self.on_container_layout = Some(Box::new(f));
        self
    }

    pub fn on_content_size_change(mut self, f: impl FnMut((f32, f32)) + Send + 'static) -> Self {
        self.on_content_size_change = Some(Box::new(f));
        self
    }

    /// Hand one event to its handler, if registered
    pub fn deliver(&mut self, event: DragListEvent<T>) {
        match event {
            DragListEvent::DragBegin(index) => call(&mut self.on_drag_begin, index),
            DragListEvent::PlaceholderIndexChange(index) => {
                call(&mut self.on_placeholder_index_change, index)
            }
            DragListEvent::Release(index) => call(&mut self.on_release, index),
            DragListEvent::DragEnd(end) => call(&mut self.on_drag_end, end),
            DragListEvent::ScrollOffsetChange(offset) => {
                call(&mut self.on_scroll_offset_change, offset)
            }
            DragListEvent::ContainerLayout { layout } => call(&mut self.on_container_layout, layout),
            DragListEvent::ContentSizeChange(w, h) => call(&mut self.on_content_size_change, (w, h)),
        }
    }

    /// Deliver everything pending in `inbox`. Returns the number of events
    /// drained.
    pub fn pump(&mut self, inbox: &Inbox<DragListEvent<T>>) -> usize {
        let mut count = 0;
        for event in inbox.drain() {
            self.deliver(event);
            count += 1;
        }
        count
    }
}

fn call<A>(handler: &mut Option<Handler<A>>, arg: A) {
    if let Some(f) = handler {
        f(arg);
    }
}
