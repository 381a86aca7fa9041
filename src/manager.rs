//! The facade the rest of the application talks to.
//!
//! # Responsibilities
//! - Compose enumerator, probe, detector, failover, and monitor into one
//!   coherent state machine
//! - Lazily run detection exactly once, collapsing concurrent first callers
//! - Validate manual overrides before they touch any state
//! - Expose a read-only snapshot for display
//!
//! Nothing outside this module is meant to be depended on by application
//! code; upload flows and pollers resolve their endpoints against the URL
//! returned here.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use url::Url;

use crate::config::schema::DiscoveryConfig;
use crate::discovery::detector::Detector;
use crate::error::ScoutError;
use crate::failover::FailoverController;
use crate::health::monitor::HealthMonitor;
use crate::health::probe::HealthProbe;
use crate::registry::{ServerRecord, ServerRegistry};

/// Read-only view of the manager state, for UIs and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSnapshot {
    /// Currently selected base URL, if any.
    pub url: Option<String>,
    /// Whether a detection pass has completed (or an override was applied).
    pub initialized: bool,
    /// Whether a detection pass is in flight right now.
    pub detecting: bool,
    /// Informational error from the last pass, if any.
    pub error: Option<String>,
    /// Known-healthy servers in failover priority order.
    pub servers: Vec<ServerRecord>,
}

/// Backend endpoint manager: discovery, failover, and background health
/// checks behind one surface.
pub struct ApiManager {
    config: Arc<DiscoveryConfig>,
    registry: Arc<ServerRegistry>,
    detector: Arc<Detector>,
    failover: Arc<FailoverController>,
    monitor: Arc<HealthMonitor>,
    /// Collapses concurrent first callers of `get_url` onto one detection.
    init_lock: Mutex<()>,
}

impl ApiManager {
    pub fn new(config: DiscoveryConfig) -> Self {
        let config = Arc::new(config);
        let registry = Arc::new(ServerRegistry::new());
        let probe = HealthProbe::new();

        let detector = Arc::new(Detector::new(
            Arc::clone(&config),
            Arc::clone(&registry),
            probe.clone(),
        ));
        let failover = Arc::new(FailoverController::new(
            Arc::clone(&registry),
            Arc::clone(&detector),
        ));
        let monitor = Arc::new(HealthMonitor::new(
            Arc::clone(&registry),
            Arc::clone(&failover),
            probe,
            Duration::from_millis(config.monitor.timeout_ms),
        ));

        Self {
            config,
            registry,
            detector,
            failover,
            monitor,
            init_lock: Mutex::new(()),
        }
    }

    /// Current backend base URL, running detection on first use.
    ///
    /// Subsequent calls return the stored URL without touching the network.
    pub async fn get_url(&self) -> Result<String, ScoutError> {
        if self.registry.is_initialized() {
            return self.registry.active_url().ok_or(ScoutError::NoUrlAvailable);
        }

        let _guard = self.init_lock.lock().await;
        // someone else may have finished detection while we waited
        if self.registry.is_initialized() {
            return self.registry.active_url().ok_or(ScoutError::NoUrlAvailable);
        }
        Ok(self.detector.detect().await)
    }

    /// Manual override: bypasses detection entirely and does not touch the
    /// known-server list. Rejected before any state change when the URL is
    /// empty or unusable.
    pub fn set_url(&self, url: &str) -> Result<(), ScoutError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ScoutError::invalid_override(url, "empty url"));
        }
        let parsed = Url::parse(trimmed)
            .map_err(|e| ScoutError::invalid_override(url, e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScoutError::invalid_override(
                url,
                format!("unsupported scheme {:?}", parsed.scheme()),
            ));
        }
        if parsed.host_str().is_none() {
            return Err(ScoutError::invalid_override(url, "missing host"));
        }

        tracing::info!(url = %trimmed, "manual backend override applied");
        self.registry.override_url(trimmed.to_string());
        Ok(())
    }

    /// Switch to the next known-healthy server, or re-detect when none
    /// remains.
    pub async fn failover(&self) -> String {
        self.failover.failover().await
    }

    /// Force a fresh detection round regardless of current state.
    pub async fn redetect(&self) -> String {
        self.detector.detect().await
    }

    /// Read-only state for display purposes.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            url: self.registry.active_url(),
            initialized: self.registry.is_initialized(),
            detecting: self.registry.is_detecting(),
            error: self.registry.last_error(),
            servers: self.registry.known_servers(),
        }
    }

    /// Arm the background monitor with the configured interval. Idempotent;
    /// a second start re-arms instead of stacking timers.
    pub fn start_monitor(&self) {
        self.monitor
            .start(Duration::from_secs(self.config.monitor.interval_secs));
    }

    /// Arm the background monitor with an explicit interval.
    pub fn start_monitor_with(&self, interval: Duration) {
        self.monitor.start(interval);
    }

    /// Disarm the background monitor. No-op when already stopped.
    pub fn stop_monitor(&self) {
        self.monitor.stop();
    }

    pub fn monitor_running(&self) -> bool {
        self.monitor.is_running()
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }
}
