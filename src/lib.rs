//! Backend endpoint discovery and failover.
//!
//! Given a deployment where the backend's address is not known at build
//! time, this crate enumerates candidate hosts, probes them concurrently for
//! liveness, selects a working one, and transparently migrates to another
//! when the active one fails — continuously, in the background, without
//! disrupting callers.
//!
//! The integration surface is [`manager::ApiManager`]; everything else is
//! plumbing behind it.

pub mod config;
pub mod discovery;
pub mod error;
pub mod failover;
pub mod health;
pub mod manager;
pub mod observability;
pub mod registry;

pub use config::DiscoveryConfig;
pub use error::ScoutError;
pub use manager::{ApiManager, ConfigSnapshot};
pub use registry::ServerRecord;
