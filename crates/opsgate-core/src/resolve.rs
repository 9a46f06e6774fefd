//! Provider resolution
//!
//! Turns (user, target) into the ordered sequence of providers the
//! dispatcher should attempt. Ordering always follows the registry's
//! registration order, which is stable and deterministic, so repeated
//! resolutions against an unchanged ACL yield identical sequences.

use crate::acl::{AclDocument, UserId};
use crate::authorize::{Decision, authorize};
use crate::error::ResolveError;
use crate::target::CommandTarget;

/// Resolution engine for one invocation
///
/// Borrows the ACL snapshot and the registry's provider order; both are
/// read-only for the life of the invocation.
pub struct Resolver<'a> {
    acl: &'a AclDocument,
    provider_order: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        acl: &'a AclDocument,
        provider_order: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            acl,
            provider_order: provider_order.into_iter().map(Into::into).collect(),
        }
    }

    /// Candidate providers for a server-scoped command (`find`,
    /// `reboot`), in registry order.
    ///
    /// An explicit provider yields a singleton sequence or the denial
    /// for that provider. Auto-detection keeps every provider for which
    /// the user is authorized to touch the named server; an empty result
    /// upgrades to `DenyUnknownUser` when the user holds no grants at
    /// all, so the caller can tell "who are you" apart from "no server
    /// of yours matched".
    pub fn resolve_target(
        &self,
        user: UserId,
        target: &CommandTarget,
    ) -> Result<Vec<String>, ResolveError> {
        if let Some(provider) = &target.provider {
            self.ensure_known(provider)?;
            return match authorize(self.acl, user, provider, Some(&target.server)) {
                Decision::Allow => Ok(vec![provider.clone()]),
                denied => Err(ResolveError::Denied(denied)),
            };
        }

        let candidates: Vec<String> = self
            .provider_order
            .iter()
            .filter(|provider| {
                authorize(self.acl, user, provider, Some(&target.server)).is_allow()
            })
            .cloned()
            .collect();

        if candidates.is_empty() {
            return Err(ResolveError::Denied(self.empty_candidate_denial(user)));
        }

        tracing::debug!(
            user,
            server = %target.server,
            candidates = ?candidates,
            "resolved candidate providers"
        );
        Ok(candidates)
    }

    /// Providers the user may list, in registry order. Admins get every
    /// registered provider; an explicit provider narrows the result to a
    /// singleton after a provider-level authorization check.
    pub fn resolve_listing(
        &self,
        user: UserId,
        provider: Option<&str>,
    ) -> Result<Vec<String>, ResolveError> {
        if let Some(provider) = provider {
            self.ensure_known(provider)?;
            return match authorize(self.acl, user, provider, None) {
                Decision::Allow => Ok(vec![provider.to_string()]),
                denied => Err(ResolveError::Denied(denied)),
            };
        }

        let authorized: Vec<String> = self
            .provider_order
            .iter()
            .filter(|provider| authorize(self.acl, user, provider, None).is_allow())
            .cloned()
            .collect();

        if authorized.is_empty() {
            return Err(ResolveError::Denied(self.empty_candidate_denial(user)));
        }

        Ok(authorized)
    }

    fn ensure_known(&self, provider: &str) -> Result<(), ResolveError> {
        if self.provider_order.iter().any(|known| known == provider) {
            Ok(())
        } else {
            Err(ResolveError::UnknownProvider(provider.to_string()))
        }
    }

    fn empty_candidate_denial(&self, user: UserId) -> Decision {
        if !self.acl.is_admin(user) && !self.acl.has_grants(user) {
            Decision::DenyUnknownUser
        } else {
            Decision::DenyServer
        }
    }
}
