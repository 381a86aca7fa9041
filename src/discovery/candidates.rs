//! Candidate host enumeration.
//!
//! Produces the ordered list of plausible backend hosts from configuration.
//! Purely local: absent sources are skipped, nothing blocks, nothing probes.

use std::collections::HashSet;

use crate::config::schema::HostsConfig;

/// Last-resort default when enumeration produces nothing at all.
pub const DEFAULT_FALLBACK_HOST: &str = "10.255.11.3";

/// Common private-network addresses tried when nothing better is known.
const COMMON_HOSTS: &[&str] = &[
    "10.255.11.3",
    "192.168.1.100",
    "192.168.0.100",
    "172.16.0.100",
];

/// An unverified host/port pair that might run the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostCandidate {
    pub host: String,
    pub port: u16,
}

impl HostCandidate {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse a config entry of the form `host` or `host:port`.
    fn parse(entry: &str, default_port: u16) -> Option<Self> {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }
        if let Some((host, port)) = entry.rsplit_once(':') {
            // A second colon means an IPv6 literal, not a port suffix.
            if !host.contains(':') {
                if let Ok(port) = port.parse() {
                    return Some(Self::new(host, port));
                }
            }
        }
        Some(Self::new(entry, default_port))
    }

    /// Base URL this candidate would serve the API from.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn is_loopback(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}

/// Enumerate candidate hosts in priority order, de-duplicated.
///
/// Priority: explicit override, then the serving origin (unless loopback),
/// then developer fallbacks, then the hard-coded common list.
pub fn enumerate(config: &HostsConfig) -> Vec<HostCandidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut push = |candidate: HostCandidate| {
        if seen.insert(candidate.clone()) {
            candidates.push(candidate);
        }
    };

    if let Some(host) = &config.host_override {
        if let Some(candidate) = HostCandidate::parse(host, config.port) {
            push(candidate);
        }
    }

    if let Some(origin) = &config.origin_host {
        let origin = origin.trim();
        if !origin.is_empty() && !is_loopback(origin) {
            push(HostCandidate::new(origin, config.port));
        }
    }

    for entry in &config.dev_hosts {
        if let Some(candidate) = HostCandidate::parse(entry, config.port) {
            push(candidate);
        }
    }

    if config.include_common_hosts {
        for host in COMMON_HOSTS {
            push(HostCandidate::new(*host, config.port));
        }
    }

    candidates
}
