//! Liveness probing.
//!
//! A probe tries a short, fixed priority list of well-known status endpoints
//! with successively smaller sub-timeouts, so the total wall time stays
//! bounded by the caller's budget even when every attempt has to time out.

use std::time::Duration;

use reqwest::header::CACHE_CONTROL;
use tokio::time;

/// Probes candidate backends for liveness.
#[derive(Debug, Clone)]
pub struct HealthProbe {
    client: reqwest::Client,
}

impl Default for HealthProbe {
    fn default() -> Self {
        // Probes target LAN backends directly; a system proxy would only
        // falsify the result.
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl HealthProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `host:port` answers like a live backend within
    /// `timeout`. Returns false on any failure; never errors.
    pub async fn probe(&self, host: &str, port: u16, timeout: Duration) -> bool {
        let base = format!("http://{}:{}", host, port);

        // Dedicated health endpoint first, then the generic status endpoint,
        // then the bare root, each on a shrinking share of the budget.
        let attempts = [
            (format!("{base}/health"), timeout),
            (format!("{base}/api/status"), timeout / 2),
            (base, timeout / 3),
        ];

        for (url, budget) in attempts {
            if self.attempt(&url, budget).await {
                return true;
            }
        }
        false
    }

    /// Probe an already-formed base URL (the monitor's path). An unparsable
    /// URL is logged and treated as a failed probe.
    pub async fn probe_url(&self, raw: &str, timeout: Duration) -> bool {
        let parsed = match url::Url::parse(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(url = %raw, error = %e, "unparsable active url, treating as probe failure");
                return false;
            }
        };
        let Some(host) = parsed.host_str() else {
            tracing::warn!(url = %raw, "active url has no host, treating as probe failure");
            return false;
        };
        let port = parsed.port_or_known_default().unwrap_or(80);
        self.probe(host, port, timeout).await
    }

    async fn attempt(&self, url: &str, budget: Duration) -> bool {
        let request = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .timeout(budget)
            .send();

        // The timeout drops the in-flight request future; a late answer is
        // discarded, never acted on.
        match time::timeout(budget, request).await {
            Ok(Ok(response)) => {
                let success = response.status().is_success();
                if !success {
                    tracing::debug!(url = %url, status = %response.status(), "probe got non-success status");
                }
                success
            }
            Ok(Err(e)) => {
                tracing::debug!(url = %url, error = %e, "probe failed: connection error");
                false
            }
            Err(_) => {
                tracing::debug!(url = %url, "probe failed: timeout");
                false
            }
        }
    }
}
