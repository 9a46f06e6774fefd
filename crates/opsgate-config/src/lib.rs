//! Configuration loading for opsgate
//!
//! Supplies the two inputs the core cannot derive itself: the raw ACL
//! document and per-provider credential bundles. Both come from the
//! environment; the surrounding deployment (secret store, parameter
//! injection) is responsible for putting them there.

pub mod error;

pub use error::*;

use opsgate_cloud::Credentials;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Inline ACL document (takes precedence over the file-based sources)
pub const ACL_JSON_ENV: &str = "OPSGATE_ACL_JSON";

/// Path to an ACL document file
pub const ACL_PATH_ENV: &str = "OPSGATE_ACL_PATH";

/// Per-provider credential bundles: `OPSGATE_CREDENTIALS_<ID>` holds the
/// provider's JSON bundle, e.g.
/// `OPSGATE_CREDENTIALS_BITLAUNCH={"api_key":"..."}`
pub const CREDENTIALS_ENV_PREFIX: &str = "OPSGATE_CREDENTIALS_";

/// Load the raw ACL document.
///
/// Lookup order:
/// 1. `OPSGATE_ACL_JSON` (inline JSON)
/// 2. `OPSGATE_ACL_PATH` (file path)
/// 3. `~/.config/opsgate/acl.json`
///
/// Returns the parsed JSON value; validation against the provider
/// registry happens in `opsgate-core`. A missing or syntactically
/// invalid document is fatal; the invocation cannot authorize without
/// an ACL.
pub fn load_acl_document() -> Result<serde_json::Value> {
    if let Ok(inline) = std::env::var(ACL_JSON_ENV) {
        return Ok(serde_json::from_str(&inline)?);
    }

    let path = find_acl_file()?;
    let raw = std::fs::read_to_string(&path)?;
    tracing::info!(path = %path.display(), "loaded ACL document");
    Ok(serde_json::from_str(&raw)?)
}

/// Locate the ACL document file.
pub fn find_acl_file() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(ACL_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join("opsgate").join("acl.json");
        if global.exists() {
            return Ok(global);
        }
    }

    Err(ConfigError::AclNotFound)
}

/// Per-provider credential bundles for one invocation
#[derive(Debug, Default)]
pub struct CredentialStore {
    bundles: BTreeMap<String, Credentials>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every `OPSGATE_CREDENTIALS_<ID>` bundle from the
    /// environment. A bundle that is not valid JSON is skipped with a
    /// warning; the affected provider then fails at client construction
    /// with a missing-credentials error rather than poisoning the whole
    /// invocation.
    ///
    /// A provider's base URL can be overridden without touching the
    /// secret material via `OPSGATE_<ID>_BASE_URL`; the override is
    /// merged into the bundle here.
    pub fn from_env() -> Self {
        let mut store = Self::new();

        for (key, raw) in std::env::vars() {
            let Some(suffix) = key.strip_prefix(CREDENTIALS_ENV_PREFIX) else {
                continue;
            };
            let provider = suffix.to_ascii_lowercase();

            let mut bundle: serde_json::Value = match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(%provider, %err, "ignoring malformed credential bundle");
                    continue;
                }
            };

            if let Ok(base_url) = std::env::var(format!("OPSGATE_{suffix}_BASE_URL"))
                && let Some(obj) = bundle.as_object_mut()
            {
                obj.insert("base_url".to_string(), serde_json::Value::String(base_url));
            }

            store.insert(provider, Credentials::new(bundle));
        }

        store
    }

    pub fn insert(&mut self, provider: impl Into<String>, credentials: Credentials) {
        self.bundles.insert(provider.into(), credentials);
    }

    pub fn get(&self, provider: &str) -> Option<&Credentials> {
        self.bundles.get(provider)
    }

    /// Providers a bundle was configured for.
    pub fn provider_ids(&self) -> Vec<&str> {
        self.bundles.keys().map(String::as_str).collect()
    }
}
