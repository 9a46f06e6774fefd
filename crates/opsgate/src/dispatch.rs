//! Command dispatch
//!
//! One dispatcher invocation executes one chat command end to end:
//! resolve the candidate providers, call them, aggregate the result.
//! `find` and `reboot` walk candidates sequentially: first success
//! wins, and a reboot must never reach two providers. `list` fans out
//! to every authorized provider concurrently and reports per-provider
//! failures alongside the servers it did get.

use crate::error::DispatchError;
use crate::outcome::{
    FindOutcome, ListOutcome, ProviderFailure, ProviderListing, RebootOutcome,
};
use opsgate_cloud::{CloudError, ProviderRegistry, Result as CloudResult, VpsProvider};
use opsgate_config::CredentialStore;
use opsgate_core::{AclDocument, CommandTarget, ResolveError, Resolver, UserId};
use std::time::Duration;

/// Budget for a single provider call, on top of the HTTP timeout the
/// clients carry themselves.
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(45);

/// Executes chat commands against the resolved providers
///
/// Borrows the invocation's read-only state: the ACL snapshot, the
/// registry, and the credential store. Cheap to construct per command.
pub struct Dispatcher<'a> {
    acl: &'a AclDocument,
    registry: &'a ProviderRegistry,
    credentials: &'a CredentialStore,
    call_timeout: Duration,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        acl: &'a AclDocument,
        registry: &'a ProviderRegistry,
        credentials: &'a CredentialStore,
    ) -> Self {
        Self {
            acl,
            registry,
            credentials,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// List servers across every provider the user may see.
    ///
    /// Providers are queried concurrently; the aggregate is grouped in
    /// registry order regardless of completion order. Non-admin users
    /// only see servers inside their allow-lists.
    pub async fn list(
        &self,
        user: UserId,
        provider: Option<&str>,
    ) -> Result<ListOutcome, DispatchError> {
        let providers = self
            .resolver()
            .resolve_listing(user, provider)
            .map_err(|err| self.resolve_failure(err))?;
        let is_admin = self.acl.is_admin(user);

        let calls = providers.iter().map(|provider| async move {
            match self.create_client(provider) {
                Ok(client) => self.bounded(provider, client.list_servers()).await,
                Err(err) => Err(err),
            }
        });
        let results = futures_util::future::join_all(calls).await;

        let mut outcome = ListOutcome::default();
        for (provider, result) in providers.iter().zip(results) {
            match result {
                Ok(mut servers) => {
                    if !is_admin
                        && let Some(grant) = self.acl.grant_for(user, provider)
                    {
                        servers.retain(|server| grant.allows_server(&server.name));
                    }
                    outcome.listings.push(ProviderListing {
                        provider: provider.clone(),
                        servers,
                    });
                }
                Err(error) => {
                    tracing::warn!(%provider, %error, "provider listing failed");
                    outcome.failures.push(ProviderFailure::new(provider, error));
                }
            }
        }

        tracing::info!(
            user,
            servers = outcome.total_servers(),
            failed = outcome.failures.len(),
            "list dispatch complete"
        );
        Ok(outcome)
    }

    /// Find a server across the resolved candidates, first match wins.
    pub async fn find(
        &self,
        user: UserId,
        target: &CommandTarget,
    ) -> Result<FindOutcome, DispatchError> {
        let candidates = self
            .resolver()
            .resolve_target(user, target)
            .map_err(|err| self.resolve_failure(err))?;

        let mut failures = Vec::new();
        for provider in &candidates {
            let client = match self.create_client(provider) {
                Ok(client) => client,
                Err(error) => {
                    tracing::warn!(%provider, %error, "skipping provider");
                    failures.push(ProviderFailure::new(provider, error));
                    continue;
                }
            };

            match self.bounded(provider, client.find_server(&target.server)).await {
                Ok(Some(server)) => {
                    tracing::info!(%provider, server = %target.server, "server found");
                    return Ok(FindOutcome::Found {
                        provider: provider.clone(),
                        server,
                        failures,
                    });
                }
                // absence on one provider is not a failure
                Ok(None) => continue,
                Err(error) => {
                    tracing::warn!(%provider, %error, "provider lookup failed");
                    failures.push(ProviderFailure::new(provider, error));
                }
            }
        }

        if failures.is_empty() {
            Ok(FindOutcome::NotFound {
                searched: candidates,
            })
        } else {
            Ok(FindOutcome::Unavailable {
                searched: candidates,
                failures,
            })
        }
    }

    /// Reboot a server on the first candidate that has it.
    ///
    /// Candidates are walked strictly sequentially: the reboot is
    /// non-idempotent, so it must never be in flight on two providers
    /// for one invocation, and a timed-out attempt (which may have
    /// reached the backend) terminates the walk as ambiguous instead
    /// of moving on.
    pub async fn reboot(
        &self,
        user: UserId,
        target: &CommandTarget,
    ) -> Result<RebootOutcome, DispatchError> {
        let candidates = self
            .resolver()
            .resolve_target(user, target)
            .map_err(|err| self.resolve_failure(err))?;

        let mut failures = Vec::new();
        for provider in &candidates {
            let client = match self.create_client(provider) {
                Ok(client) => client,
                Err(error) => {
                    tracing::warn!(%provider, %error, "skipping provider");
                    failures.push(ProviderFailure::new(provider, error));
                    continue;
                }
            };

            match self.bounded(provider, client.reboot_server(&target.server)).await {
                Ok(Some(ack)) => {
                    tracing::info!(%provider, server = %target.server, "reboot initiated");
                    return Ok(RebootOutcome::Initiated {
                        provider: provider.clone(),
                        ack,
                        failures,
                    });
                }
                Ok(None) => continue,
                Err(error) if error.is_ambiguous() => {
                    tracing::warn!(
                        %provider,
                        server = %target.server,
                        "reboot timed out in flight; outcome unknown"
                    );
                    return Ok(RebootOutcome::Ambiguous {
                        provider: provider.clone(),
                        failures,
                    });
                }
                Err(error) => {
                    tracing::warn!(%provider, %error, "provider reboot failed");
                    failures.push(ProviderFailure::new(provider, error));
                }
            }
        }

        if failures.is_empty() {
            Ok(RebootOutcome::NotFound {
                searched: candidates,
            })
        } else {
            Ok(RebootOutcome::Unavailable {
                searched: candidates,
                failures,
            })
        }
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.acl, self.registry.known_provider_ids())
    }

    fn create_client(&self, provider: &str) -> CloudResult<Box<dyn VpsProvider>> {
        let Some(credentials) = self.credentials.get(provider) else {
            return Err(CloudError::InvalidCredentials {
                provider: provider.to_string(),
                message: "no credential bundle configured".to_string(),
            });
        };
        self.registry.create(provider, credentials)
    }

    /// Wrap a provider call in the dispatcher's per-call budget. An
    /// elapsed budget abandons the in-flight call and reports it as a
    /// provider timeout.
    async fn bounded<T>(
        &self,
        provider: &str,
        call: impl Future<Output = CloudResult<T>>,
    ) -> CloudResult<T> {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CloudError::Timeout {
                provider: provider.to_string(),
            }),
        }
    }

    fn resolve_failure(&self, err: ResolveError) -> DispatchError {
        match err {
            ResolveError::UnknownProvider(id) => DispatchError::UnknownProvider {
                id,
                known: self.registry.known_provider_ids().join(", "),
            },
            ResolveError::Denied(decision) => DispatchError::Denied(decision),
        }
    }
}
