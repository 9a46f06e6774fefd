//! Dispatch error types

use opsgate_core::Decision;
use thiserror::Error;

/// Failures that abort a command before or during resolution
///
/// Outcomes that reach the provider layer are reported through the
/// typed outcome structs instead; these errors are the cases where no
/// dispatch happened at all.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Authorization denial. Renders without detail; the caller picks a
    /// user-facing message from the wrapped decision so denials never
    /// reveal what the user cannot see.
    #[error("access denied")]
    Denied(Decision),

    #[error("unknown provider: {id}. Supported: {known}")]
    UnknownProvider { id: String, known: String },

    /// ACL load or validation failure. The cause is logged at the load
    /// site; this variant deliberately renders as a generic message.
    #[error("configuration error")]
    Configuration(anyhow::Error),
}

impl DispatchError {
    /// The authorization decision behind a denial, if this is one.
    pub fn decision(&self) -> Option<Decision> {
        match self {
            DispatchError::Denied(decision) => Some(*decision),
            _ => None,
        }
    }
}
