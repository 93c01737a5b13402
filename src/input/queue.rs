//! Input event queue.
//!
//! The only synchronization point between the polling thread and the main
//! loop. Producers hold an [`EventSender`]; the main loop owns the
//! [`EventQueue`] and drains it once per iteration.

use super::InputEvent;
use crossbeam::channel::{Receiver, Sender};

/// Producer half of the queue. Cheap to clone and `Send`.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<InputEvent>,
}

impl EventSender {
    /// Append an event.
    ///
    /// Rotary end-of-gesture markers are dropped here and never reach the
    /// queue, so they cannot count as user activity. Returns whether the event
    /// was queued.
    pub fn push(&self, event: InputEvent) -> bool {
        if event.is_end_of_gesture() {
            return false;
        }

        tracing::debug!(
            "Queued {} event type={} code={} value={}",
            event.device_type,
            event.event_type,
            event.code,
            event.value
        );

        // The receiver lives as long as the main loop; a send error only
        // happens during shutdown.
        self.tx.send(event).is_ok()
    }
}

/// Unbounded FIFO of input events, consumed by the main loop.
#[derive(Debug)]
pub struct EventQueue {
    tx: Sender<InputEvent>,
    rx: Receiver<InputEvent>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = crossbeam::channel::unbounded();
        Self { tx, rx }
    }

    /// Get a producer handle.
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Append an event from the consumer side (e.g. emulated input).
    pub fn push(&self, event: InputEvent) -> bool {
        self.sender().push(event)
    }

    /// Hand every queued event to `consumer` in arrival order.
    ///
    /// Events pushed while draining are delivered in the same call. Returns
    /// the number of events delivered.
    pub fn drain_into<F>(&self, mut consumer: F) -> usize
    where
        F: FnMut(InputEvent),
    {
        let mut delivered = 0;
        while let Ok(event) = self.rx.try_recv() {
            consumer(event);
            delivered += 1;
        }
        delivered
    }

    /// Number of events waiting.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
