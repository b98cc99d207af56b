//! Quorum-acknowledged broadcast.

use crate::{PeerId, RpcConfig, Transport};
use fanout_barrier::{AckCallback, BarrierError, QuorumBarrier};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fans a request out to a peer set and blocks until every peer has
/// acknowledged or the configured timeout elapses.
///
/// The coordinator does not retry: on timeout the error carries the partial
/// acknowledgement count and the caller decides whether to retry the whole
/// operation, escalate, or report failure upward.
pub struct Coordinator<T: Transport> {
    transport: T,
    config: RpcConfig,
}

impl<T: Transport> Coordinator<T> {
    /// Create a coordinator over the given transport.
    pub fn new(transport: T, config: RpcConfig) -> Self {
        Self { transport, config }
    }

    /// Dispatch the pending request to every peer and wait for all of them
    /// to acknowledge.
    ///
    /// The timeout window opens before the first dispatch, so dispatch time
    /// counts against the budget. An empty peer set has nothing to
    /// acknowledge and returns immediately.
    ///
    /// # Errors
    ///
    /// [`BarrierError::Timeout`] with the partial acknowledgement count if
    /// the deadline elapses first.
    pub fn broadcast(&self, peers: &[PeerId]) -> Result<(), BarrierError> {
        if peers.is_empty() {
            debug!("broadcast to empty peer set, nothing to wait for");
            return Ok(());
        }

        let barrier = Arc::new(QuorumBarrier::new(peers.len() as u64));
        for &peer in peers {
            debug!(%peer, "dispatching request");
            let callback: Arc<dyn AckCallback> = barrier.clone();
            self.transport.dispatch(peer, callback);
        }

        match barrier.wait(self.config.request_timeout) {
            Ok(()) => {
                info!(acks = barrier.received(), "broadcast acknowledged");
                Ok(())
            }
            Err(err) => {
                warn!(%err, "broadcast did not reach quorum in time");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    /// Acknowledges every dispatch on the spot.
    struct InstantAckTransport;

    impl Transport for InstantAckTransport {
        fn dispatch(&self, _peer: PeerId, callback: Arc<dyn AckCallback>) {
            callback.on_response();
        }
    }

    /// Acknowledges only peers below a cutoff; the rest stay silent.
    struct PartialAckTransport {
        ack_below: u64,
    }

    impl Transport for PartialAckTransport {
        fn dispatch(&self, peer: PeerId, callback: Arc<dyn AckCallback>) {
            if peer.as_u64() < self.ack_below {
                callback.on_response();
            }
        }
    }

    /// Acknowledges from a spawned thread after a short delay, so the
    /// coordinator is actually blocked when responses arrive.
    struct DelayedAckTransport {
        delay: Duration,
    }

    impl Transport for DelayedAckTransport {
        fn dispatch(&self, _peer: PeerId, callback: Arc<dyn AckCallback>) {
            let delay = self.delay;
            thread::spawn(move || {
                thread::sleep(delay);
                callback.on_response();
            });
        }
    }

    fn peers(n: u64) -> Vec<PeerId> {
        (0..n).map(PeerId::new).collect()
    }

    #[test]
    fn test_broadcast_succeeds_when_all_ack() {
        let coordinator = Coordinator::new(InstantAckTransport, RpcConfig::default());
        assert_eq!(coordinator.broadcast(&peers(5)), Ok(()));
    }

    #[test]
    fn test_broadcast_times_out_with_partial_acks() {
        let coordinator = Coordinator::new(
            PartialAckTransport { ack_below: 2 },
            RpcConfig::with_request_timeout(Duration::from_millis(50)),
        );

        let result = coordinator.broadcast(&peers(5));
        assert_eq!(
            result,
            Err(BarrierError::Timeout {
                received: 2,
                required: 5,
            })
        );
    }

    #[test]
    fn test_broadcast_blocks_for_delayed_acks() {
        let coordinator = Coordinator::new(
            DelayedAckTransport {
                delay: Duration::from_millis(50),
            },
            RpcConfig::with_request_timeout(Duration::from_secs(10)),
        );

        assert_eq!(coordinator.broadcast(&peers(3)), Ok(()));
    }

    /// Records dispatched callbacks instead of acking them.
    struct RecordingTransport {
        handles: Arc<Mutex<Vec<Arc<dyn AckCallback>>>>,
    }

    impl Transport for RecordingTransport {
        fn dispatch(&self, _peer: PeerId, callback: Arc<dyn AckCallback>) {
            self.handles.lock().unwrap().push(callback);
        }
    }

    #[test]
    fn test_dispatched_callbacks_share_one_barrier() {
        let handles: Arc<Mutex<Vec<Arc<dyn AckCallback>>>> = Arc::new(Mutex::new(Vec::new()));
        let coordinator = Coordinator::new(
            RecordingTransport {
                handles: Arc::clone(&handles),
            },
            RpcConfig::with_request_timeout(Duration::from_secs(10)),
        );

        let acker = {
            let handles = Arc::clone(&handles);
            thread::spawn(move || {
                // Wait for all three dispatches, then ack each through its
                // own recorded trait-object handle.
                loop {
                    let recorded = handles.lock().unwrap();
                    if recorded.len() == 3 {
                        for callback in recorded.iter() {
                            callback.on_response();
                        }
                        break;
                    }
                    drop(recorded);
                    thread::sleep(Duration::from_millis(5));
                }
            })
        };

        assert_eq!(coordinator.broadcast(&peers(3)), Ok(()));
        acker.join().unwrap();
    }

    #[test]
    fn test_broadcast_to_empty_peer_set() {
        // No peers means no acknowledgements to wait for, not an assertion
        // failure in the barrier constructor.
        let coordinator = Coordinator::new(InstantAckTransport, RpcConfig::default());
        assert_eq!(coordinator.broadcast(&[]), Ok(()));
    }
}
