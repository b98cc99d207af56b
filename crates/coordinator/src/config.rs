//! Coordinator configuration.

use std::time::Duration;

/// Configuration for quorum-acknowledged broadcasts.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Total time budget for one broadcast: dispatch plus the wait for
    /// acknowledgements. Measured from the moment the barrier is created,
    /// so slow dispatch eats into the wait.
    pub request_timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            // Schema-wide operations can be slow on loaded replicas; match
            // the usual cluster-wide RPC ceiling rather than a per-read one.
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl RpcConfig {
    /// Create a config with a custom request timeout.
    pub fn with_request_timeout(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }
}
