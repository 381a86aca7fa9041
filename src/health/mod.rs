//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! probe.rs:
//!     host:port + budget
//!     → GET /health, then /api/status, then /
//!     → first 2xx wins, everything else degrades to false
//!
//! monitor.rs:
//!     periodic timer
//!     → probe only the active URL (short timeout)
//!     → on failure, hand over to the failover controller
//! ```
//!
//! # Design Decisions
//! - All network failures stop at the probe boundary; nothing here throws
//! - The monitor is the only recurring task in the crate
//! - start/stop are idempotent so UI-style lifecycle hooks can call them
//!   repeatedly

pub mod monitor;
pub mod probe;

pub use monitor::HealthMonitor;
pub use probe::HealthProbe;
