//! Error types for the barrier.

use thiserror::Error;

/// Errors from waiting on a quorum barrier.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BarrierError {
    /// The deadline elapsed before enough acknowledgements arrived.
    ///
    /// Carries the partial count so the caller can report how far the
    /// operation got before giving up.
    #[error("quorum wait timed out: received only {received} of {required} acknowledgements")]
    Timeout {
        /// Acknowledgements received when the deadline elapsed.
        received: u64,
        /// Acknowledgements the barrier was waiting for.
        required: u64,
    },
}
