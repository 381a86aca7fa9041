//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment-variable overrides, env wins)
//!     → validation.rs (semantic checks)
//!     → DiscoveryConfig (validated, immutable)
//!     → shared via Arc to detector, probe, monitor
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changing it means building a new
//!   manager
//! - All fields have defaults so a bare environment still works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{config_from_env, load_config, ConfigError};
pub use schema::{DiscoveryConfig, HostsConfig, MonitorConfig, ProbeConfig};
