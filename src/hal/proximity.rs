//! PIR proximity readings.
//!
//! The backplate link reports readings from its own thread through a
//! [`ProximitySender`]; the main loop drains the [`ProximityFeed`] and hands
//! each reading to the backlight.

use crossbeam::channel::{Receiver, Sender};

/// Producer half, given to the backplate link.
#[derive(Debug, Clone)]
pub struct ProximitySender {
    tx: Sender<i32>,
}

impl ProximitySender {
    /// Report one PIR reading. Returns false once the feed is gone.
    pub fn report(&self, value: i32) -> bool {
        tracing::trace!("Proximity reading {}", value);
        self.tx.send(value).is_ok()
    }
}

/// Proximity readings waiting for the main loop.
#[derive(Debug)]
pub struct ProximityFeed {
    tx: Sender<i32>,
    rx: Receiver<i32>,
}

impl Default for ProximityFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ProximityFeed {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam::channel::unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> ProximitySender {
        ProximitySender {
            tx: self.tx.clone(),
        }
    }

    /// Hand every waiting reading to `consumer`, oldest first.
    pub fn drain_into<F>(&self, mut consumer: F) -> usize
    where
        F: FnMut(i32),
    {
        let mut delivered = 0;
        while let Ok(value) = self.rx.try_recv() {
            consumer(value);
            delivered += 1;
        }
        delivered
    }
}
