//! Opsgate chat-ops authorization and dispatch core
//!
//! Ties the pieces together: the builtin provider registry, the ACL
//! snapshot, and the dispatcher that executes one chat-originated
//! command (`list` / `find` / `reboot`) end to end. The caller parses
//! the chat surface and renders the typed outcomes; opsgate decides who
//! may do what, where to try it, and what actually happened.
//!
//! ```no_run
//! use opsgate::{Dispatcher, builtin_registry, load_acl};
//! use opsgate_config::CredentialStore;
//! use opsgate_core::CommandTarget;
//!
//! # async fn run() -> Result<(), opsgate::DispatchError> {
//! let registry = builtin_registry();
//! let acl = load_acl(&registry)?;
//! let credentials = CredentialStore::from_env();
//!
//! let dispatcher = Dispatcher::new(&acl, &registry, &credentials);
//! let target = CommandTarget::parse("bitlaunch:web-1").unwrap();
//! let outcome = dispatcher.reboot(222, &target).await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
pub mod error;
pub mod outcome;
pub mod registry;

pub use dispatch::Dispatcher;
pub use error::DispatchError;
pub use outcome::{
    FindOutcome, ListOutcome, ProviderFailure, ProviderListing, RebootOutcome,
};
pub use registry::builtin_registry;

// Re-exported for embedders
pub use opsgate_cloud::{ProviderRegistry, ServerStatus, ServerSummary};
pub use opsgate_config::CredentialStore;
pub use opsgate_core::{AclDocument, CommandTarget, Decision};

/// Load the ACL document from the environment and validate it against
/// the registry's provider set.
///
/// Any failure here is fatal to the invocation; nothing can be
/// authorized without a trusted ACL. The underlying cause is logged for
/// the operator; the returned error renders as a generic configuration
/// error and never exposes document contents.
pub fn load_acl(registry: &ProviderRegistry) -> Result<AclDocument, DispatchError> {
    let raw = opsgate_config::load_acl_document().map_err(|err| {
        tracing::error!(%err, "failed to load ACL document");
        DispatchError::Configuration(err.into())
    })?;

    let known = registry.known_provider_ids();
    AclDocument::parse(&raw, &known).map_err(|err| {
        tracing::error!(%err, "rejected malformed ACL document");
        DispatchError::Configuration(err.into())
    })
}
