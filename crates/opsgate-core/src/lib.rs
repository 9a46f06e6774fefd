//! Opsgate authorization core
//!
//! The access-control model and resolution engine behind opsgate's chat
//! commands: who may touch which servers on which providers, and which
//! providers a command should be tried against, in what order.
//!
//! The crate is pure: no I/O, no clocks. The ACL document is parsed
//! once into an immutable [`AclDocument`] snapshot (all-or-nothing), the
//! [`authorize()`] function evaluates a single (user, provider, server)
//! question, and the [`Resolver`] turns a user plus a parsed
//! [`CommandTarget`] into a deterministic, registry-ordered candidate
//! sequence for the dispatcher.

pub mod acl;
pub mod authorize;
pub mod error;
pub mod resolve;
pub mod target;

// Re-exports
pub use acl::{AclDocument, ProviderGrant, UserId};
pub use authorize::{Decision, authorize};
pub use error::{AclError, ResolveError, TargetError};
pub use resolve::Resolver;
pub use target::CommandTarget;
