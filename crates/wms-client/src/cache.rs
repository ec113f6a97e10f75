//! Capabilities caching.
//!
//! Holds at most one parsed capabilities document, regardless of the WMS
//! version it was fetched with. The document and its fetch instant live in
//! one immutable entry that is swapped as a whole, so readers see either the
//! previous entry or the new one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

use wms_common::Capabilities;

/// Cached capabilities with the instant they were stored.
#[derive(Debug)]
pub struct CachedCapabilities {
    pub capabilities: Arc<Capabilities>,
    pub stored_at: Instant,
}

impl CachedCapabilities {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// Single-slot capabilities cache with a fixed TTL.
pub struct CapabilitiesCache {
    slot: RwLock<Option<Arc<CachedCapabilities>>>,
    ttl: Duration,
}

impl CapabilitiesCache {
    /// Create an empty cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        info!(ttl_secs = ttl.as_secs(), "Initializing capabilities cache");
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// Get cached capabilities if still valid.
    pub async fn get(&self) -> Option<Arc<Capabilities>> {
        let guard = self.slot.read().await;
        if let Some(cached) = guard.as_ref() {
            if cached.is_fresh(self.ttl) {
                debug!("Capabilities cache hit");
                return Some(cached.capabilities.clone());
            }
            debug!("Capabilities cache expired");
        } else {
            debug!("Capabilities cache empty");
        }
        None
    }

    /// The current entry, fresh or not.
    pub async fn snapshot(&self) -> Option<Arc<CachedCapabilities>> {
        self.slot.read().await.clone()
    }

    /// Replace the cached entry.
    pub async fn set(&self, capabilities: Arc<Capabilities>) {
        let entry = Arc::new(CachedCapabilities {
            capabilities,
            stored_at: Instant::now(),
        });
        *self.slot.write().await = Some(entry);
        debug!("Capabilities cached");
    }

    /// Empty the cache.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
        debug!("Capabilities cache invalidated");
    }

    /// Get the configured TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
