//! Dragflow Core Runtime
//!
//! This crate provides the foundational primitives shared by the dragflow
//! crates:
//!
//! - **Gesture Events**: Platform-agnostic pan/touch events with pointer kinds
//! - **State Transitions**: Tagged-enum state machines driven by event ids
//! - **Mailbox**: Non-blocking hand-off from the frame loop to the application
//!
//! # Example
//!
//! ```rust
//! use dragflow_core::mailbox;
//!
//! let (mailbox, inbox) = mailbox::channel::<u32>();
//!
//! // Posted from the frame loop, never blocks
//! mailbox.post(1);
//! mailbox.post(2);
//!
//! // Drained later from the application context, in order
//! let received: Vec<u32> = inbox.drain().collect();
//! assert_eq!(received, vec![1, 2]);
//! ```

pub mod events;
pub mod fsm;
pub mod mailbox;

pub use events::{Event, EventData, EventType, PointerKind};
pub use fsm::{EventId, StateTransitions};
pub use mailbox::{Inbox, Mailbox};
