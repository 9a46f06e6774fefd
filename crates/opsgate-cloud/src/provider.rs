//! VPS provider trait definition

use crate::error::Result;
use crate::server::ServerSummary;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// VPS provider abstraction trait
///
/// All VPS backends (BitLaunch, Kamatera, etc.) implement this trait to
/// provide a unified interface for the dispatcher. Servers are addressed
/// by name at this boundary; translation to provider-native identifiers
/// happens inside the implementation.
///
/// Calls make a single underlying HTTP attempt bounded by the client's
/// configured timeout. Retry policy belongs to the caller, with one
/// restriction: `reboot_server` is not idempotent and must never be
/// retried automatically.
#[async_trait]
pub trait VpsProvider: Send + Sync + std::fmt::Debug {
    /// Returns the provider id (e.g. "bitlaunch", "kamatera")
    fn name(&self) -> &str;

    /// Returns the provider display name for user-facing output
    fn display_name(&self) -> &str;

    /// List every server visible to the configured credentials
    async fn list_servers(&self) -> Result<Vec<ServerSummary>>;

    /// Find a server by exact, case-sensitive name. `None` means no such
    /// server on this provider, which is not an error.
    async fn find_server(&self, name: &str) -> Result<Option<ServerSummary>>;

    /// Reboot a server by name. Resolves the name to the provider-native
    /// id first; `None` means no exact match existed.
    async fn reboot_server(&self, name: &str) -> Result<Option<RebootAck>>;
}

/// Acknowledgement that a provider accepted a reboot request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebootAck {
    /// Provider that accepted the reboot
    pub provider: String,

    /// Server name the reboot was issued for
    pub server: String,
}

impl RebootAck {
    pub fn new(provider: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            server: server.into(),
        }
    }
}
