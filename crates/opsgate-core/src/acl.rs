//! Access-control document model
//!
//! The ACL document is a JSON value of the shape
//!
//! ```json
//! {
//!   "admins": [111],
//!   "users": {
//!     "222": {
//!       "bitlaunch": { "servers": ["web-1"] },
//!       "kamatera": null
//!     }
//!   }
//! }
//! ```
//!
//! Parsing is all-or-nothing: any malformed entry rejects the whole
//! document. The parsed snapshot is immutable; reload means replacing
//! the snapshot wholesale.

use crate::error::AclError;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Chat-surface user identifier
pub type UserId = i64;

/// A user's permission record for one provider
///
/// The `Option` is load-bearing: `None` means every server under the
/// provider is allowed, `Some(vec![])` means the provider is explicitly
/// denied, and a non-empty list is an exact-name allow-list. Never
/// flatten this into a bare collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderGrant {
    servers: Option<Vec<String>>,
}

impl ProviderGrant {
    /// Grant covering every server under the provider.
    pub fn all_servers() -> Self {
        Self { servers: None }
    }

    /// Grant that explicitly denies every server.
    pub fn denied() -> Self {
        Self {
            servers: Some(Vec::new()),
        }
    }

    /// Grant restricted to an exact-name allow-list.
    pub fn allow_list(servers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            servers: Some(servers.into_iter().map(Into::into).collect()),
        }
    }

    /// Exact, case-sensitive membership test against the allow-list.
    pub fn allows_server(&self, server: &str) -> bool {
        match &self.servers {
            None => true,
            Some(list) => list.iter().any(|s| s == server),
        }
    }

    /// True when the grant denies every server (`servers: []`).
    pub fn is_denied(&self) -> bool {
        matches!(&self.servers, Some(list) if list.is_empty())
    }

    pub fn servers(&self) -> Option<&[String]> {
        self.servers.as_deref()
    }
}

/// Immutable access-control snapshot: admins plus per-user per-provider
/// grants.
#[derive(Debug, Clone, Default)]
pub struct AclDocument {
    admins: BTreeSet<UserId>,
    grants: BTreeMap<UserId, BTreeMap<String, ProviderGrant>>,
}

impl AclDocument {
    pub fn new(
        admins: impl IntoIterator<Item = UserId>,
        grants: impl IntoIterator<Item = (UserId, Vec<(String, ProviderGrant)>)>,
    ) -> Self {
        Self {
            admins: admins.into_iter().collect(),
            grants: grants
                .into_iter()
                .map(|(user, providers)| (user, providers.into_iter().collect()))
                .collect(),
        }
    }

    /// Parse and validate a raw ACL document against the set of provider
    /// ids the registry actually implements.
    pub fn parse(doc: &Value, known_providers: &[&str]) -> Result<Self, AclError> {
        let root = doc.as_object().ok_or(AclError::InvalidRoot)?;

        let mut admins = BTreeSet::new();
        if let Some(raw) = root.get("admins") {
            let entries = raw.as_array().ok_or(AclError::InvalidAdmins)?;
            for entry in entries {
                let id = entry.as_i64().ok_or(AclError::InvalidAdmins)?;
                admins.insert(id);
            }
        }

        let mut grants: BTreeMap<UserId, BTreeMap<String, ProviderGrant>> = BTreeMap::new();
        if let Some(raw) = root.get("users") {
            let users = raw.as_object().ok_or(AclError::InvalidUsers)?;
            for (user_key, providers) in users {
                let user: UserId = user_key
                    .parse()
                    .map_err(|_| AclError::InvalidUserKey(user_key.clone()))?;
                let providers = providers
                    .as_object()
                    .ok_or_else(|| AclError::InvalidUserKey(user_key.clone()))?;

                let mut user_grants = BTreeMap::new();
                for (provider, grant) in providers {
                    if !known_providers.contains(&provider.as_str()) {
                        return Err(AclError::UnknownProvider(provider.clone()));
                    }
                    user_grants.insert(provider.clone(), parse_grant(provider, grant)?);
                }
                grants.insert(user, user_grants);
            }
        }

        Ok(Self { admins, grants })
    }

    /// Parse from a raw JSON string. Syntax errors reject the document.
    pub fn parse_str(doc: &str, known_providers: &[&str]) -> Result<Self, AclError> {
        let value: Value = serde_json::from_str(doc)?;
        Self::parse(&value, known_providers)
    }

    pub fn is_admin(&self, user: UserId) -> bool {
        self.admins.contains(&user)
    }

    /// The user's grant for one provider. `None` means the user has no
    /// entry for that provider at all, distinct from an empty grant,
    /// which is an explicit deny.
    pub fn grant_for(&self, user: UserId, provider: &str) -> Option<&ProviderGrant> {
        self.grants.get(&user)?.get(provider)
    }

    /// Provider ids the user holds grants for. Empty for admins, whose
    /// access is not grant-driven.
    pub fn provider_ids_for(&self, user: UserId) -> Vec<&str> {
        self.grants
            .get(&user)
            .map(|providers| providers.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// True when the user holds at least one grant.
    pub fn has_grants(&self, user: UserId) -> bool {
        self.grants
            .get(&user)
            .is_some_and(|providers| !providers.is_empty())
    }

    /// True when the document authorizes nobody at all.
    pub fn is_empty(&self) -> bool {
        self.admins.is_empty() && self.grants.is_empty()
    }
}

fn parse_grant(provider: &str, raw: &Value) -> Result<ProviderGrant, AclError> {
    // null grant value means "all servers", as does an object without a
    // "servers" key
    let obj = match raw {
        Value::Null => return Ok(ProviderGrant::all_servers()),
        Value::Object(obj) => obj,
        _ => return Err(AclError::InvalidGrant(provider.to_string())),
    };

    let servers = match obj.get("servers") {
        None | Some(Value::Null) => return Ok(ProviderGrant::all_servers()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(AclError::InvalidGrant(provider.to_string())),
    };

    let mut seen = BTreeSet::new();
    let mut list = Vec::with_capacity(servers.len());
    for entry in servers {
        let name = entry
            .as_str()
            .ok_or_else(|| AclError::InvalidGrant(provider.to_string()))?;
        if name.is_empty() {
            return Err(AclError::EmptyServerName(provider.to_string()));
        }
        if !seen.insert(name) {
            return Err(AclError::DuplicateServer(provider.to_string()));
        }
        list.push(name.to_string());
    }

    Ok(ProviderGrant {
        servers: Some(list),
    })
}
