//! The queue of pending graphics operations.
//!
//! Producers append operations from their own threads, the compositor
//! periodically drains the whole queue and applies it to the raster.
//! Drained operations count as in flight until the compositor reports
//! them applied, so a producer that needs the raster to be current can
//! block until both the queue and the in-flight set are empty.

use std::sync::{Condvar, Mutex};

use crate::GraphicsOp;

#[derive(Debug, Default)]
struct State {
    ops: Vec<GraphicsOp>,
    /// Operations drained but not yet applied to the raster
    in_flight: usize,
}

#[derive(Debug, Default)]
pub struct OpQueue {
    state: Mutex<State>,
    emptied: Condvar,
}

impl OpQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, op: GraphicsOp) {
        let mut state = self.state.lock().expect("op queue lock poisoned");
        state.ops.push(op);
        log::debug!("op queue grew to {} entries", state.ops.len());
    }

    /// Take every queued operation, leaving the queue empty. The taken
    /// operations stay in flight until [`Self::mark_applied`]; waiters
    /// are not woken before then.
    #[must_use]
    pub fn drain(&self) -> Vec<GraphicsOp> {
        let mut state = self.state.lock().expect("op queue lock poisoned");
        let drained = std::mem::take(&mut state.ops);
        state.in_flight += drained.len();
        drained
    }

    /// Report every drained operation as applied to the raster and wake
    /// all threads waiting for the queue to empty.
    pub fn mark_applied(&self) {
        let mut state = self.state.lock().expect("op queue lock poisoned");
        state.in_flight = 0;
        self.emptied.notify_all();
    }

    /// Throw away every queued operation without applying it.
    pub fn clear(&self) {
        let mut state = self.state.lock().expect("op queue lock poisoned");
        state.ops.clear();
        self.emptied.notify_all();
    }

    /// Block until every operation enqueued so far has been applied to
    /// the raster.
    ///
    /// Returns immediately if the queue is already empty and nothing is
    /// in flight. This is the synchronization point for producers that
    /// want to read pixels the compositor may not have painted yet.
    pub fn wait_until_empty(&self) {
        let mut state = self.state.lock().expect("op queue lock poisoned");
        while !state.ops.is_empty() || state.in_flight > 0 {
            state = self.emptied.wait(state).expect("op queue lock poisoned");
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().expect("op queue lock poisoned").ops.len()
    }

    /// Whether the queue holds no pending and no in-flight operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let state = self.state.lock().expect("op queue lock poisoned");
        state.ops.is_empty() && state.in_flight == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use math::Vec2D;
    use raster::Argb;

    fn fill_op() -> GraphicsOp {
        GraphicsOp::Fill {
            origin: Vec2D::new(0.0, 0.0),
            color: Argb::BLACK,
        }
    }

    #[test]
    fn drained_operations_stay_in_flight_until_applied() {
        let queue = OpQueue::new();
        queue.enqueue(fill_op());
        queue.enqueue(fill_op());

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain().len(), 2);
        assert_eq!(queue.len(), 0);
        assert!(!queue.is_empty());

        queue.mark_applied();
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn waiting_on_an_empty_queue_does_not_block() {
        let queue = OpQueue::new();
        queue.wait_until_empty();
    }

    #[test]
    fn waiters_wake_up_once_drained_operations_are_applied() {
        let queue = Arc::new(OpQueue::new());
        let applied = Arc::new(AtomicBool::new(false));
        queue.enqueue(fill_op());

        let waiter = {
            let queue = Arc::clone(&queue);
            let applied = Arc::clone(&applied);
            thread::spawn(move || {
                queue.wait_until_empty();
                assert!(
                    applied.load(Ordering::SeqCst),
                    "waiter woke while operations were still in flight"
                );
            })
        };

        // give the waiter a moment to block
        thread::sleep(Duration::from_millis(10));
        let ops = queue.drain();
        assert_eq!(ops.len(), 1);

        // the raster work happens between drain and mark_applied
        thread::sleep(Duration::from_millis(50));
        applied.store(true, Ordering::SeqCst);
        queue.mark_applied();

        waiter.join().expect("waiter thread panicked");
    }
}
