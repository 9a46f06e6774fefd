//! Opaque provider credential bundles

use crate::error::{CloudError, Result};

/// Credential bundle for one provider, as handed over by the secret
/// store. The shape is provider-specific JSON; this type only offers
/// keyed access so clients can pull the fields they need.
///
/// The `Debug` impl redacts the contents. Credential material must never
/// reach logs or error messages.
#[derive(Clone)]
pub struct Credentials(serde_json::Value);

impl Credentials {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Empty bundle, for providers that take no credentials (tests).
    pub fn empty() -> Self {
        Self(serde_json::Value::Object(Default::default()))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    /// Fetch a required string field, failing with `InvalidCredentials`
    /// naming the missing key (never the bundle contents).
    pub fn require_str(&self, provider: &str, key: &str) -> Result<&str> {
        self.get_str(key)
            .ok_or_else(|| CloudError::InvalidCredentials {
                provider: provider.to_string(),
                message: format!("missing '{key}'"),
            })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credentials(<redacted>)")
    }
}
