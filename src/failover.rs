//! Failover between known-healthy servers.
//!
//! Cheap local promotion is preferred when alternatives are already known;
//! a full re-detection round is the fallback of last resort.

use std::sync::Arc;

use crate::discovery::detector::Detector;
use crate::registry::ServerRegistry;

/// Switches the active server when the current one stops answering.
pub struct FailoverController {
    registry: Arc<ServerRegistry>,
    detector: Arc<Detector>,
}

impl FailoverController {
    pub fn new(registry: Arc<ServerRegistry>, detector: Arc<Detector>) -> Self {
        Self { registry, detector }
    }

    /// Promote the next known-healthy server, evicting the active one.
    /// Re-detects from scratch when no alternative remains.
    pub async fn failover(&self) -> String {
        if let Some(next) = self.registry.promote_next() {
            tracing::info!(url = %next, "failed over to next known server");
            return next;
        }

        tracing::info!("no alternative server known, running full re-detection");
        self.detector.detect().await
    }
}
