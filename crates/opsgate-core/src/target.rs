//! Command target parsing
//!
//! Server-scoped commands take either `server-name` or
//! `provider:server-name`. The provider part is lowercased and trimmed;
//! a split that leaves either side empty (`:name`, `name:`) is treated
//! as a bare server name, preserving the original surface behavior.

use crate::error::TargetError;
use std::str::FromStr;

/// Parsed argument of a server-scoped command. Per-invocation, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTarget {
    /// Explicit provider selection, when the user gave one
    pub provider: Option<String>,

    /// Server name, exact and case-sensitive
    pub server: String,
}

impl CommandTarget {
    /// Target with no provider prefix.
    pub fn server(name: impl Into<String>) -> Self {
        Self {
            provider: None,
            server: name.into(),
        }
    }

    /// Target pinned to one provider.
    pub fn on_provider(provider: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
            server: name.into(),
        }
    }

    pub fn parse(arg: &str) -> Result<Self, TargetError> {
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(TargetError::EmptyServerName);
        }

        if let Some((provider, server)) = arg.split_once(':') {
            let provider = provider.trim().to_lowercase();
            let server = server.trim();
            if !provider.is_empty() && !server.is_empty() {
                return Ok(Self::on_provider(provider, server));
            }
        }

        Ok(Self::server(arg))
    }
}

impl FromStr for CommandTarget {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
