//! Callback seam between the transport layer and response accounting.

/// Invoked by the transport layer once per inbound acknowledgement.
///
/// Implementations must be safe to call from any number of concurrent
/// network-handling threads, must never block beyond brief internal
/// synchronization, and must never fail; this sits on the hot inbound
/// message path.
pub trait AckCallback: Send + Sync {
    /// Record one acknowledgement. Message content is irrelevant here; the
    /// transport has already matched the response to the operation this
    /// callback tracks.
    fn on_response(&self);

    /// Whether the transport should record round-trip latency for responses
    /// delivered to this callback. Barrier-style callbacks opt out: the
    /// operations they track are not representative of normal request
    /// latency.
    fn measures_latency(&self) -> bool {
        false
    }
}
