//! Shared application state.

use std::sync::Arc;

use providers::nvidia::{NvidiaClient, NvidiaConfig};

/// Shared application state. Read-only after startup.
pub struct AppState {
    /// Upstream forwarder holding the server credential.
    pub upstream: NvidiaClient,

    /// Request body limit for `/api/chat`.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(upstream: NvidiaConfig, max_body_bytes: usize) -> anyhow::Result<Arc<Self>> {
        Ok(Arc::new(Self {
            upstream: NvidiaClient::new(upstream)?,
            max_body_bytes,
        }))
    }
}
