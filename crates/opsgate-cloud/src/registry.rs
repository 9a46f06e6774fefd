//! Provider registry
//!
//! Maps provider ids to client factories. Registration is compiled-in:
//! the set of supported providers is fixed per build, and registration
//! order is the order the resolver and dispatcher walk candidates in.

use crate::credentials::Credentials;
use crate::error::{CloudError, Result};
use crate::provider::VpsProvider;

type ProviderFactory =
    Box<dyn Fn(&Credentials) -> Result<Box<dyn VpsProvider>> + Send + Sync>;

/// Ordered registry of provider client factories
///
/// Read-only after construction; safe to share across concurrent
/// invocations by reference.
#[derive(Default)]
pub struct ProviderRegistry {
    factories: Vec<(String, ProviderFactory)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Register a provider factory. Re-registering an id replaces the
    /// previous factory and keeps the original position.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn(&Credentials) -> Result<Box<dyn VpsProvider>> + Send + Sync + 'static,
    {
        let id = id.into();
        if let Some(slot) = self.factories.iter_mut().find(|(known, _)| *known == id) {
            slot.1 = Box::new(factory);
        } else {
            self.factories.push((id, Box::new(factory)));
        }
    }

    /// Provider ids in registration order. Backs resolver ordering and
    /// user-facing "supported providers" enumerations.
    pub fn known_provider_ids(&self) -> Vec<&str> {
        self.factories.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.iter().any(|(known, _)| known == id)
    }

    /// Construct a client for `id` with the given credentials.
    pub fn create(&self, id: &str, credentials: &Credentials) -> Result<Box<dyn VpsProvider>> {
        let Some((_, factory)) = self.factories.iter().find(|(known, _)| known == id) else {
            return Err(self.unknown_provider(id));
        };
        factory(credentials)
    }

    /// The error surfaced for an unregistered provider id, carrying the
    /// enumeration of ids that are actually registered.
    pub fn unknown_provider(&self, id: &str) -> CloudError {
        CloudError::UnknownProvider {
            id: id.to_string(),
            known: self.known_provider_ids().join(", "),
        }
    }
}
