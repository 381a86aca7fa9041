//! Configuration loading from disk and the environment.
//!
//! Environment variables always win over file values, mirroring how the
//! deployments this crate targets inject per-machine settings.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::DiscoveryConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Explicit backend host, highest-priority candidate source.
pub const ENV_HOST: &str = "API_SCOUT_HOST";
/// Host the application is served from (skipped when loopback).
pub const ENV_ORIGIN: &str = "API_SCOUT_ORIGIN";
/// Backend port applied to hosts without an explicit one.
pub const ENV_PORT: &str = "API_SCOUT_PORT";
/// Comma-separated developer fallback hosts.
pub const ENV_DEV_HOSTS: &str = "API_SCOUT_DEV_HOSTS";
/// Probe timeout override, in milliseconds.
pub const ENV_PROBE_TIMEOUT_MS: &str = "API_SCOUT_PROBE_TIMEOUT_MS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a TOML config file, apply environment overrides, and validate.
pub fn load_config(path: &Path) -> Result<DiscoveryConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: DiscoveryConfig = toml::from_str(&content)?;

    apply_env(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration from defaults plus environment overrides only.
pub fn config_from_env() -> Result<DiscoveryConfig, ConfigError> {
    let mut config = DiscoveryConfig::default();

    apply_env(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env(config: &mut DiscoveryConfig) {
    if let Some(host) = non_empty_var(ENV_HOST) {
        config.hosts.host_override = Some(host);
    }
    if let Some(origin) = non_empty_var(ENV_ORIGIN) {
        config.hosts.origin_host = Some(origin);
    }
    if let Some(port) = non_empty_var(ENV_PORT) {
        match port.parse() {
            Ok(port) => config.hosts.port = port,
            Err(_) => tracing::warn!(var = ENV_PORT, value = %port, "ignoring unparsable port override"),
        }
    }
    if let Some(hosts) = non_empty_var(ENV_DEV_HOSTS) {
        config.hosts.dev_hosts = hosts
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(timeout) = non_empty_var(ENV_PROBE_TIMEOUT_MS) {
        match timeout.parse() {
            Ok(ms) => config.probe.timeout_ms = ms,
            Err(_) => tracing::warn!(
                var = ENV_PROBE_TIMEOUT_MS,
                value = %timeout,
                "ignoring unparsable timeout override"
            ),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}
