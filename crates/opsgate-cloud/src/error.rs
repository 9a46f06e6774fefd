//! Provider error types

use thiserror::Error;

/// Provider and registry errors
///
/// Every variant except `UnknownProvider` and `InvalidCredentials`
/// classifies as "provider unavailable" for dispatch purposes: the
/// dispatcher records it against the provider and moves on.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Unknown provider: {id}. Supported: {known}")]
    UnknownProvider { id: String, known: String },

    #[error("Invalid credentials for {provider}: {message}")]
    InvalidCredentials { provider: String, message: String },

    #[error("{provider}: authentication failed - check API credentials")]
    AuthenticationFailed { provider: String },

    #[error("{provider}: access forbidden - check API permissions")]
    Forbidden { provider: String },

    #[error("{provider}: rate limit exceeded - try again later")]
    RateLimited { provider: String },

    #[error("{provider}: API error: {status}")]
    Api { provider: String, status: u16 },

    #[error("{provider}: request timed out")]
    Timeout { provider: String },

    #[error("{provider}: network error - API unreachable")]
    Network { provider: String, message: String },
}

impl CloudError {
    /// True when the backend may have received the request before the
    /// failure was observed. A reboot that fails this way must not be
    /// re-issued to another provider.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, CloudError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
