//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate, fields over message text
//! - Filtering is environment-driven (RUST_LOG), with a sane default
//! - The library only emits events; subscriber setup is a binary concern

pub mod logging;
