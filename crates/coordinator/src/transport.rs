//! Transport seam.

use crate::PeerId;
use fanout_barrier::AckCallback;
use std::sync::Arc;

/// The messaging layer as the coordinator sees it.
///
/// One call per peer per broadcast: deliver the already-encoded request and
/// register `callback` to be invoked once for each acknowledgement the peer
/// sends back. Encoding, delivery, retransmission, and response matching all
/// live behind this trait.
pub trait Transport: Send + Sync {
    /// Send the pending request to `peer`, wiring its acknowledgement to
    /// `callback`.
    fn dispatch(&self, peer: PeerId, callback: Arc<dyn AckCallback>);
}
