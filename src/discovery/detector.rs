//! Automatic backend detection.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;

use crate::config::schema::DiscoveryConfig;
use crate::discovery::candidates::{self, HostCandidate, DEFAULT_FALLBACK_HOST};
use crate::health::probe::HealthProbe;
use crate::registry::{ServerRecord, ServerRegistry};

/// Runs full enumerate-then-probe rounds and commits the outcome.
///
/// Safe to call repeatedly; every call performs its own independent probing
/// round and ends in exactly one synchronous registry commit.
pub struct Detector {
    config: Arc<DiscoveryConfig>,
    registry: Arc<ServerRegistry>,
    probe: HealthProbe,
}

impl Detector {
    pub fn new(config: Arc<DiscoveryConfig>, registry: Arc<ServerRegistry>, probe: HealthProbe) -> Self {
        Self {
            config,
            registry,
            probe,
        }
    }

    /// Probe all candidates in parallel and select the active server.
    ///
    /// The probes are joined, not raced: the healthy subset keeps enumeration
    /// order no matter which probe answers first, which is what makes
    /// failover priority deterministic.
    pub async fn detect(&self) -> String {
        let candidates = candidates::enumerate(&self.config.hosts);
        let timeout = Duration::from_millis(self.config.probe.timeout_ms);

        tracing::info!(candidates = candidates.len(), "detecting available backend servers");
        self.registry.set_detecting(true);

        let probes = candidates
            .iter()
            .map(|c| self.probe.probe(&c.host, c.port, timeout));
        let results = join_all(probes).await;

        let healthy: Vec<ServerRecord> = candidates
            .iter()
            .zip(results)
            .filter(|(_, alive)| *alive)
            .map(|(c, _)| ServerRecord::healthy(c.url()))
            .collect();

        let mut error = None;
        let active = if let Some(first) = healthy.first() {
            tracing::info!(url = %first.url, available = healthy.len(), "selected backend server");
            first.url.clone()
        } else if let Some(first) = candidates.first() {
            // Best-effort guess: nothing answered, so keep the highest-priority
            // candidate and let the monitor retry later.
            tracing::warn!(url = %first.url(), "no backend answered, using first candidate unverified");
            first.url()
        } else {
            let fallback = HostCandidate::new(DEFAULT_FALLBACK_HOST, self.config.hosts.port).url();
            tracing::warn!(url = %fallback, "candidate enumeration was empty, using built-in default");
            error = Some("no candidate hosts configured".to_string());
            fallback
        };

        self.registry.commit_detection(active.clone(), healthy, error);
        active
    }
}
