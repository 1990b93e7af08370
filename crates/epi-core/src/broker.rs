//! The `Broker<T>` publish abstraction.
//!
//! A broker is the sole cross-agent communication path: agents publish
//! batches of `Visit`s, `InfectionOutcome`s, and `ContactReport`s without
//! knowing who consumes them.  `send` is fire-and-forget — no acknowledgment,
//! no backpressure.
//!
//! # Ordering and concurrency
//!
//! Many agents may call `send` concurrently during a phase, so `send` takes
//! `&self` and implementations synchronise internally.  A broker makes no
//! ordering guarantee across agents, only that one agent's batch stays
//! contiguous and in order.

use std::sync::Mutex;

/// Batch publish channel for messages of type `T`.
pub trait Broker<T>: Send + Sync {
    /// Publish a batch of messages.
    fn send(&self, batch: Vec<T>);
}

// ── QueueBroker ───────────────────────────────────────────────────────────────

/// A broker that accumulates everything it receives for later draining.
///
/// This is how the driver collects one phase's output before handing it to
/// the next consumer, and how tests observe agent output.
pub struct QueueBroker<T> {
    queue: Mutex<Vec<T>>,
}

impl<T> QueueBroker<T> {
    pub fn new() -> Self {
        Self { queue: Mutex::new(Vec::new()) }
    }

    /// Take every message received so far, leaving the broker empty.
    pub fn drain(&self) -> Vec<T> {
        std::mem::take(&mut self.queue.lock().unwrap())
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().unwrap().is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
}

impl<T> Default for QueueBroker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> Broker<T> for QueueBroker<T> {
    fn send(&self, mut batch: Vec<T>) {
        self.queue.lock().unwrap().append(&mut batch);
    }
}

// ── NullBroker ────────────────────────────────────────────────────────────────

/// A broker that discards every batch.  Use where a phase's output is not
/// consumed (e.g. visit publishing in a contact-tracing-only test).
pub struct NullBroker;

impl<T: Send> Broker<T> for NullBroker {
    fn send(&self, _batch: Vec<T>) {}
}
