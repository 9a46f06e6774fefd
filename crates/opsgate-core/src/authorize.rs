//! Authorization decisions
//!
//! A single pure function over the ACL snapshot. The evaluation order is
//! load-bearing: the admin bypass short-circuits before any
//! provider-keyed lookup, so admin access never depends on document
//! shape beyond the `admins` set, and an absent grant is distinguished
//! from a server outside the allow-list so callers can render different
//! messages for the two.

use crate::acl::{AclDocument, UserId};

/// Outcome of one authorization question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// The user holds no grants at all (produced by the resolver, never
    /// by [`authorize`] itself)
    DenyUnknownUser,
    /// The user has no entry for this provider
    DenyUnknownProvider,
    /// The server is outside the user's allow-list for this provider
    DenyServer,
}

impl Decision {
    pub fn is_allow(self) -> bool {
        self == Decision::Allow
    }
}

/// Decide whether `user` may act on `provider`, optionally scoped to one
/// `server`. Omitting the server asks the provider-level question only,
/// as `list` does.
pub fn authorize(
    acl: &AclDocument,
    user: UserId,
    provider: &str,
    server: Option<&str>,
) -> Decision {
    // Admin bypass first; the server argument is ignored entirely.
    if acl.is_admin(user) {
        tracing::debug!(user, provider, "authorized: admin");
        return Decision::Allow;
    }

    let Some(grant) = acl.grant_for(user, provider) else {
        tracing::warn!(user, provider, "unauthorized access attempt");
        return Decision::DenyUnknownProvider;
    };

    let Some(server) = server else {
        tracing::debug!(user, provider, "authorized: provider-level grant");
        return Decision::Allow;
    };

    if grant.allows_server(server) {
        tracing::info!(user, provider, server, "authorized access");
        Decision::Allow
    } else {
        tracing::warn!(user, provider, server, "unauthorized access attempt");
        Decision::DenyServer
    }
}
