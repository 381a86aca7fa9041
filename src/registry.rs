//! Known-server registry.
//!
//! # Responsibilities
//! - Hold the active backend URL and the ordered known-healthy server list
//! - Expose cheap read access for the facade and the CLI
//! - Apply detection results and failover promotions atomically
//!
//! # Design Decisions
//! - One registry per process, shared via Arc
//! - Ordering of `known_servers` is probe-result order and doubles as
//!   failover priority
//! - All mutations are synchronous under the lock; async work completes
//!   before a commit, so readers never observe a half-applied pass

use std::sync::RwLock;

use serde::Serialize;

/// A server that answered a liveness probe during the last detection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerRecord {
    /// Base URL, e.g. `http://10.0.0.1:8000`. Identity for eviction.
    pub url: String,
    /// Probe verdict the record was created from. Entries in the registry
    /// were all observed healthy; kept for display.
    pub healthy: bool,
}

impl ServerRecord {
    pub fn healthy(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            healthy: true,
        }
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    active_url: Option<String>,
    known_servers: Vec<ServerRecord>,
    initialized: bool,
    detecting: bool,
    last_error: Option<String>,
}

/// Process-wide registry of known backend servers.
#[derive(Debug, Default)]
pub struct ServerRegistry {
    state: RwLock<RegistryState>,
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_url(&self) -> Option<String> {
        self.read().active_url.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.read().initialized
    }

    pub fn is_detecting(&self) -> bool {
        self.read().detecting
    }

    pub fn known_servers(&self) -> Vec<ServerRecord> {
        self.read().known_servers.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.read().last_error.clone()
    }

    /// Mark a detection pass as in flight (drives the facade's loading flag).
    pub fn set_detecting(&self, detecting: bool) {
        self.write().detecting = detecting;
    }

    /// Replace the registry contents with the outcome of a detection pass.
    ///
    /// This is the only transition that can set `initialized`, and it always
    /// does, success or fallback.
    pub fn commit_detection(
        &self,
        active_url: String,
        healthy: Vec<ServerRecord>,
        error: Option<String>,
    ) {
        let mut state = self.write();
        state.active_url = Some(active_url);
        state.known_servers = healthy;
        state.initialized = true;
        state.detecting = false;
        state.last_error = error;
    }

    /// Evict the current active server and promote the next known-healthy
    /// one. Returns the new active URL, or `None` when no alternative
    /// remains and a full re-detection is required instead.
    pub fn promote_next(&self) -> Option<String> {
        let mut state = self.write();
        if state.known_servers.len() < 2 {
            return None;
        }
        let evicted = state.active_url.take();
        state
            .known_servers
            .retain(|record| Some(&record.url) != evicted.as_ref());
        let next = state.known_servers.first()?.url.clone();
        state.active_url = Some(next.clone());
        Some(next)
    }

    /// Manual override: set the active URL directly, leaving the known-server
    /// list untouched.
    pub fn override_url(&self, url: String) {
        let mut state = self.write();
        state.active_url = Some(url);
        state.initialized = true;
        state.last_error = None;
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, RegistryState> {
        self.state.read().expect("registry lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, RegistryState> {
        self.state.write().expect("registry lock poisoned")
    }
}
