//! Cross-context dispatch
//!
//! The frame loop posts messages into a [`Mailbox`] without ever blocking.
//! The application context drains the paired [`Inbox`] whenever it runs.
//! Messages arrive in the order they were posted and are never coalesced.

use smallvec::SmallVec;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

/// Create a connected mailbox/inbox pair
pub fn channel<M>() -> (Mailbox<M>, Inbox<M>) {
    let (tx, rx) = mpsc::channel();
    (Mailbox { tx }, Inbox { rx })
}

/// Sending half, owned by the frame loop
pub struct Mailbox<M> {
    tx: Sender<M>,
}

impl<M> Clone for Mailbox<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<M> Mailbox<M> {
    /// Post a message. Returns false if the inbox has been dropped, in which
    /// case the message is discarded.
    pub fn post(&self, message: M) -> bool {
        if self.tx.send(message).is_err() {
            tracing::warn!("mailbox: inbox dropped, message discarded");
            return false;
        }
        true
    }

    /// Post a batch of messages collected during one frame, preserving order
    pub fn post_all<A>(&self, batch: SmallVec<A>) -> usize
    where
        A: smallvec::Array<Item = M>,
    {
        let mut delivered = 0;
        for message in batch {
            if !self.post(message) {
                break;
            }
            delivered += 1;
        }
        delivered
    }
}

/// Receiving half, owned by the application context
pub struct Inbox<M> {
    rx: Receiver<M>,
}

impl<M> Inbox<M> {
    /// Take the next pending message, if any
    pub fn try_next(&self) -> Option<M> {
        match self.rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Iterate over every message pending right now
    pub fn drain(&self) -> impl Iterator<Item = M> + '_ {
        self.rx.try_iter()
    }

    /// Wait up to `timeout` for the next message
    pub fn recv_timeout(&self, timeout: Duration) -> Option<M> {
        self.rx.recv_timeout(timeout).ok()
    }
}
