//! State shared across demo server handlers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared server state.
#[derive(Debug, Default)]
pub struct ServerState {
    requests_served: AtomicU64,
}

impl ServerState {
    /// Create fresh state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests_served: AtomicU64::new(0),
        }
    }

    /// Count one answered chat request.
    pub fn record_request(&self) -> u64 {
        self.requests_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of chat requests answered so far.
    #[must_use]
    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }
}
