//! Quorum-acknowledgement barrier.
//!
//! The building block for "send to N replicas, wait for K" cluster
//! operations: a coordinator fans a request out to its peers, then blocks on
//! a [`QuorumBarrier`] until either enough acknowledgements have arrived or
//! the deadline runs out. The transport layer feeds acknowledgements in
//! through [`AckCallback::on_response`], one call per inbound ack, from
//! however many network threads it runs.
//!
//! The barrier is single-shot: one instance serves exactly one logical
//! operation and is discarded once the wait returns.

mod barrier;
mod callback;
mod error;

pub use barrier::QuorumBarrier;
pub use callback::AckCallback;
pub use error::BarrierError;
