//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: DiscoveryConfig → Result<(), Vec<_>>
//! - Runs before a config is accepted into the system

use crate::config::schema::DiscoveryConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    ZeroProbeTimeout,
    ZeroMonitorInterval,
    ZeroMonitorTimeout,
    BadDevHost(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ZeroProbeTimeout => write!(f, "probe.timeout_ms must be > 0"),
            ValidationError::ZeroMonitorInterval => write!(f, "monitor.interval_secs must be > 0"),
            ValidationError::ZeroMonitorTimeout => write!(f, "monitor.timeout_ms must be > 0"),
            ValidationError::BadDevHost(entry) => {
                write!(f, "dev host entry {:?} has an unparsable port", entry)
            }
        }
    }
}

/// Check a deserialized configuration for semantic problems.
pub fn validate_config(config: &DiscoveryConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.probe.timeout_ms == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }
    if config.monitor.interval_secs == 0 {
        errors.push(ValidationError::ZeroMonitorInterval);
    }
    if config.monitor.timeout_ms == 0 {
        errors.push(ValidationError::ZeroMonitorTimeout);
    }

    for entry in &config.hosts.dev_hosts {
        // `host:port` entries must carry a real port; bare hosts are fine.
        if let Some((host, port)) = entry.rsplit_once(':') {
            if !host.contains(':') && port.parse::<u16>().is_err() {
                errors.push(ValidationError::BadDevHost(entry.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
