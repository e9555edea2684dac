//! Dragflow List
//!
//! Drag-to-reorder engine for virtualized scrolling lists. The crate does not
//! render or virtualize anything itself: the host forwards gesture events,
//! row layouts and scroll offsets, and reads back where every row should be
//! drawn.
//!
//! # Features
//!
//! - **Drag State Machine**: One drag at a time, frozen while the dropped
//!   item settles, committed exactly once
//! - **Midpoint Reflow**: Placeholder index that only changes when a row's
//!   midpoint is crossed
//! - **Auto-Scroll**: Inner list and outer container scrolling near edges
//! - **Mailbox Dispatch**: Consumer events posted without blocking the frame
//!
//! # Example
//!
//! ```rust
//! use dragflow_list::{DraggableList, DragListEvent, Layout};
//!
//! let (mut list, inbox) = DraggableList::builder()
//!     .data(vec!["a", "b", "c"])
//!     .key_extractor(|item: &&str, _| item.to_string())
//!     .build()
//!     .unwrap();
//!
//! list.on_container_layout(Layout::new(0.0, 0.0, 320.0, 480.0));
//! for (i, key) in ["a", "b", "c"].iter().enumerate() {
//!     list.on_cell_layout(key.to_string(), i as f32 * 40.0, 40.0);
//! }
//!
//! assert!(list.drag(&"a".to_string()));
//! assert!(list.is_active(&"a".to_string()));
//!
//! let events: Vec<_> = inbox.drain().collect();
//! assert!(events.contains(&DragListEvent::DragBegin(0)));
//! ```

pub mod autoscroll;
pub mod callbacks;
pub mod commit;
pub mod config;
pub mod drag;
pub mod error;
pub mod gesture;
pub mod host;
pub mod key_map;
pub mod list;
pub mod measure;
pub mod outer_scroll;
pub mod session;

pub use autoscroll::InnerAutoScroll;
pub use callbacks::{DragListCallbacks, DragListEvent};
pub use commit::{reorder, DragEnd};
pub use config::{Axis, DragListConfig, HitSlop};
pub use drag::{DragPhase, DragSignal, DragStateMachine};
pub use error::{DragListError, Result};
pub use gesture::{GestureAdapter, GestureSignal, PanRecognizerParams};
pub use host::{Layout, NoScroll, OuterScrollContainer, Rect, ScrollTarget};
pub use list::{DraggableList, DraggableListBuilder, KeyExtractor};
pub use measure::{Measurement, MeasurementRegistry};
pub use outer_scroll::{OuterAutoScroll, OuterScrollState, ScrollDir};
pub use session::DragSession;

// Re-export the shared primitives hosts need to drive the list
pub use dragflow_animation::SpringConfig;
pub use dragflow_core::events::{event_types, Event, EventData, PointerKind};
pub use dragflow_core::mailbox::Inbox;
