//! Server discovery subsystem.
//!
//! # Data Flow
//! ```text
//! candidates.rs:
//!     config sources (override, origin, dev hosts, common list)
//!     → ordered, de-duplicated HostCandidate list
//!
//! detector.rs:
//!     candidate list
//!     → probe all candidates in parallel (joined, order preserved)
//!     → commit healthy subset + active URL to the registry
//! ```
//!
//! # Design Decisions
//! - Enumeration never touches the network; probing never reorders
//! - Candidate order is priority order and becomes failover order
//! - A fruitless round still produces an active URL (best-effort fallback)

pub mod candidates;
pub mod detector;

pub use candidates::HostCandidate;
pub use detector::Detector;
