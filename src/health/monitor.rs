//! Background health monitoring.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::failover::FailoverController;
use crate::health::probe::HealthProbe;
use crate::registry::ServerRegistry;

/// Recurring task that re-validates the active server and fails over when it
/// stops answering.
///
/// Only the active URL is probed on a tick, never the full candidate set;
/// a full round stays the detector's job.
pub struct HealthMonitor {
    registry: Arc<ServerRegistry>,
    failover: Arc<FailoverController>,
    probe: HealthProbe,
    /// Per-tick probe budget, shorter than the detection timeout.
    timeout: Duration,
    /// Cancellation handle for the currently armed timer, if any.
    running: Mutex<Option<broadcast::Sender<()>>>,
}

impl HealthMonitor {
    pub fn new(
        registry: Arc<ServerRegistry>,
        failover: Arc<FailoverController>,
        probe: HealthProbe,
        timeout: Duration,
    ) -> Self {
        Self {
            registry,
            failover,
            probe,
            timeout,
            running: Mutex::new(None),
        }
    }

    /// Arm the recurring check. Re-arms (cancelling the previous timer
    /// first) when already running, so repeated starts never stack timers.
    pub fn start(self: &Arc<Self>, interval: Duration) {
        let (stop_tx, mut stop_rx) = broadcast::channel(1);
        let previous = self
            .running
            .lock()
            .expect("monitor lock poisoned")
            .replace(stop_tx);
        if let Some(previous) = previous {
            let _ = previous.send(());
            tracing::debug!("health monitor re-armed, previous timer cancelled");
        }

        tracing::info!(interval_secs = interval.as_secs(), "health monitor starting");
        let monitor = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            // interval fires immediately; swallow that so the first real
            // check happens one full interval after start
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        monitor.check_active().await;
                    }
                    _ = stop_rx.recv() => {
                        tracing::debug!("health monitor stopped");
                        break;
                    }
                }
            }
        });
    }

    /// Disarm the timer. No-op when already stopped.
    pub fn stop(&self) {
        if let Some(stop_tx) = self.running.lock().expect("monitor lock poisoned").take() {
            let _ = stop_tx.send(());
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().expect("monitor lock poisoned").is_some()
    }

    /// One tick: probe the active URL, fail over when it does not answer.
    /// Every failure mode ends here; the timer itself can never be killed by
    /// a bad tick.
    async fn check_active(&self) {
        let Some(url) = self.registry.active_url() else {
            return;
        };
        if self.probe.probe_url(&url, self.timeout).await {
            return;
        }

        tracing::warn!(url = %url, "active backend failed health check, attempting failover");
        let next = self.failover.failover().await;
        tracing::info!(url = %next, "health monitor switched active backend");
    }
}
