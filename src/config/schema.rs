//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files and
//! carry per-field defaults so a minimal (or empty) config is valid.

use serde::{Deserialize, Serialize};

/// Port the backend listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 8000;

/// Root configuration for endpoint discovery.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Candidate enumeration settings.
    pub hosts: HostsConfig,

    /// Liveness probe settings.
    pub probe: ProbeConfig,

    /// Background health monitor settings.
    pub monitor: MonitorConfig,
}

/// Where candidate backend hosts come from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HostsConfig {
    /// Explicit backend host. Highest priority; a single entry that outranks
    /// every other source.
    pub host_override: Option<String>,

    /// Host the application itself is being served from. Skipped when it is
    /// a loopback address, since the backend rarely lives there in the
    /// deployments this crate targets.
    pub origin_host: Option<String>,

    /// Developer fallback hosts, tried after the sources above. An entry may
    /// carry an explicit `host:port` to override the global port.
    pub dev_hosts: Vec<String>,

    /// Append the hard-coded private-network fallback list as a last resort.
    pub include_common_hosts: bool,

    /// Backend port applied to every host without an explicit port.
    pub port: u16,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            host_override: None,
            origin_host: None,
            dev_hosts: Vec::new(),
            include_common_hosts: true,
            port: DEFAULT_PORT,
        }
    }
}

/// Liveness probe settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Total wall-time budget for probing one candidate, in milliseconds.
    /// Sub-attempts against the fallback endpoints share this budget.
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_ms: 3000 }
    }
}

/// Background health monitor settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between re-validations of the active server.
    pub interval_secs: u64,

    /// Per-tick probe timeout in milliseconds. Shorter than the detection
    /// timeout so a dead server is noticed quickly.
    pub timeout_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            timeout_ms: 2000,
        }
    }
}
