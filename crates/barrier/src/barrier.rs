//! Single-shot barrier releasing on a target acknowledgement count.

use crate::{AckCallback, BarrierError};
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Blocks one initiator thread until `required` acknowledgements arrive.
///
/// The barrier has exactly two states, pending and released, and transitions
/// once: when the running count reaches `required`. A timeout is a property
/// of the [`wait`](Self::wait) call, not of the barrier: late
/// acknowledgements keep counting after release and are never an error.
///
/// The timeout window opens at construction, so time the initiator spends
/// dispatching requests before calling `wait` counts against the budget.
///
/// `on_response` may be called from any number of threads concurrently;
/// `wait` is for a single designated initiator (concurrent waits are
/// unsupported).
pub struct QuorumBarrier {
    /// Acknowledgements required to release the barrier. Fixed at
    /// construction.
    required: u64,
    /// Acknowledgements received so far. Only ever incremented.
    received: AtomicU64,
    /// Start of the timeout window.
    start: Instant,
    /// One-shot gate: flag flips to `true` exactly once and stays set.
    released: Mutex<bool>,
    gate: Condvar,
}

impl QuorumBarrier {
    /// Create a barrier that releases after `required` acknowledgements.
    ///
    /// Captures the current monotonic time as the start of the timeout
    /// window.
    ///
    /// # Panics
    ///
    /// Panics if `required` is zero. A barrier satisfied by zero responses
    /// is meaningless, and constructing one is a programming error.
    pub fn new(required: u64) -> Self {
        assert!(required >= 1, "invalid acknowledgement target: {required}");

        Self {
            required,
            received: AtomicU64::new(0),
            start: Instant::now(),
            released: Mutex::new(false),
            gate: Condvar::new(),
        }
    }

    /// Record one acknowledgement, releasing the waiter if this was the one
    /// that completed the quorum.
    ///
    /// Safe to call from any thread, in any order, any number of times,
    /// including after the barrier has already released, in which case the
    /// count simply keeps climbing and the gate signal is a no-op.
    pub fn on_response(&self) {
        // fetch_add hands every caller a distinct count, so exactly one call
        // crosses the threshold and none can under-count it.
        let received = self.received.fetch_add(1, Ordering::AcqRel) + 1;
        if received >= self.required {
            let mut released = self.released.lock();
            if !*released {
                *released = true;
                self.gate.notify_all();
            }
        }
    }

    /// Block until the quorum is reached or `budget` elapses.
    ///
    /// The deadline is `budget` measured from construction, not from this
    /// call. An already-exhausted budget fails immediately rather than
    /// blocking, unless the barrier already released, which still returns
    /// `Ok` without waiting.
    ///
    /// # Errors
    ///
    /// [`BarrierError::Timeout`] with the partial acknowledgement count if
    /// the deadline elapses before the quorum is reached.
    pub fn wait(&self, budget: Duration) -> Result<(), BarrierError> {
        let deadline = self.start + budget;
        let mut released = self.released.lock();
        while !*released {
            if self.gate.wait_until(&mut released, deadline).timed_out() {
                // A release racing the deadline wins: the quorum did arrive.
                if *released {
                    break;
                }
                return Err(BarrierError::Timeout {
                    received: self.received(),
                    required: self.required,
                });
            }
        }
        Ok(())
    }

    /// Acknowledgements received so far. May exceed
    /// [`required`](Self::required) once late or duplicate acks arrive.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Acquire)
    }

    /// Acknowledgements required to release the barrier.
    pub fn required(&self) -> u64 {
        self.required
    }

    /// Whether the barrier has released.
    pub fn is_released(&self) -> bool {
        *self.released.lock()
    }
}

impl AckCallback for QuorumBarrier {
    fn on_response(&self) {
        QuorumBarrier::on_response(self);
    }
}

impl std::fmt::Debug for QuorumBarrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuorumBarrier")
            .field("required", &self.required)
            .field("received", &self.received())
            .field("released", &self.is_released())
            .finish()
    }
}
