//! Initiator-side fan-out coordination.
//!
//! A coordinator node issues one request per peer through the [`Transport`]
//! seam, then blocks on a quorum barrier until every dispatched peer has
//! acknowledged or the configured RPC timeout elapses. The transport layer
//! owns message encoding, delivery, and response matching; this crate only
//! sees acknowledgement events.

mod config;
mod coordinator;
mod peer;
mod transport;

pub use config::RpcConfig;
pub use coordinator::Coordinator;
pub use peer::PeerId;
pub use transport::Transport;

// Callers handle the barrier's timeout directly.
pub use fanout_barrier::BarrierError;
