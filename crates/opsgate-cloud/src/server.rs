//! Normalized server types shared by all providers

use serde::{Deserialize, Serialize};

/// Server lifecycle state, normalized across provider vocabularies
///
/// Backends map their own status strings onto this set; anything a
/// backend reports that has no counterpart here becomes `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    Running,
    Stopped,
    Rebooting,
    Creating,
    Deleting,
    Unknown,
}

impl std::fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerStatus::Running => write!(f, "running"),
            ServerStatus::Stopped => write!(f, "stopped"),
            ServerStatus::Rebooting => write!(f, "rebooting"),
            ServerStatus::Creating => write!(f, "creating"),
            ServerStatus::Deleting => write!(f, "deleting"),
            ServerStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A single server as reported by a provider, produced fresh on every
/// query and never cached by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    /// Server name, the identifier users address servers by
    pub name: String,

    /// Normalized lifecycle state
    pub status: ServerStatus,

    /// Public address, when the backend reports one
    pub address: Option<String>,
}

impl ServerSummary {
    pub fn new(name: impl Into<String>, status: ServerStatus, address: Option<String>) -> Self {
        Self {
            name: name.into(),
            status,
            address,
        }
    }
}
