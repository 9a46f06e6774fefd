// not every test binary exercises every helper
#![allow(dead_code)]

use async_trait::async_trait;
use opsgate_cloud::{
    CloudError, Credentials, ProviderRegistry, RebootAck, Result, ServerStatus, ServerSummary,
    VpsProvider,
};
use opsgate_config::CredentialStore;
use opsgate_core::AclDocument;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What a scripted provider does when called.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    /// Answer from a fixed inventory.
    Servers(Vec<ServerSummary>),
    /// Fail every call with a network error.
    Unavailable,
    /// Fail every call with a timeout (the ambiguous failure class).
    TimesOut,
}

/// Scripted in-memory provider. Cloning shares the call counters, so a
/// registry factory can hand out fresh instances per invocation while
/// tests observe the total.
#[derive(Clone, Debug)]
pub struct MockProvider {
    pub id: &'static str,
    pub behavior: MockBehavior,
    pub list_calls: Arc<AtomicUsize>,
    pub find_calls: Arc<AtomicUsize>,
    pub reboot_calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn with_servers(id: &'static str, names: &[&str]) -> Self {
        let servers = names
            .iter()
            .map(|name| ServerSummary::new(*name, ServerStatus::Running, None))
            .collect();
        Self::new(id, MockBehavior::Servers(servers))
    }

    pub fn unavailable(id: &'static str) -> Self {
        Self::new(id, MockBehavior::Unavailable)
    }

    pub fn timing_out(id: &'static str) -> Self {
        Self::new(id, MockBehavior::TimesOut)
    }

    fn new(id: &'static str, behavior: MockBehavior) -> Self {
        Self {
            id,
            behavior,
            list_calls: Arc::new(AtomicUsize::new(0)),
            find_calls: Arc::new(AtomicUsize::new(0)),
            reboot_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn finds(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn reboots(&self) -> usize {
        self.reboot_calls.load(Ordering::SeqCst)
    }

    fn failure(&self) -> CloudError {
        match self.behavior {
            MockBehavior::TimesOut => CloudError::Timeout {
                provider: self.id.to_string(),
            },
            _ => CloudError::Network {
                provider: self.id.to_string(),
                message: "scripted outage".to_string(),
            },
        }
    }

    fn inventory(&self) -> Result<&[ServerSummary]> {
        match &self.behavior {
            MockBehavior::Servers(servers) => Ok(servers),
            _ => Err(self.failure()),
        }
    }
}

#[async_trait]
impl VpsProvider for MockProvider {
    fn name(&self) -> &str {
        self.id
    }

    fn display_name(&self) -> &str {
        self.id
    }

    async fn list_servers(&self) -> Result<Vec<ServerSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.inventory()?.to_vec())
    }

    async fn find_server(&self, name: &str) -> Result<Option<ServerSummary>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .inventory()?
            .iter()
            .find(|server| server.name == name)
            .cloned())
    }

    async fn reboot_server(&self, name: &str) -> Result<Option<RebootAck>> {
        self.reboot_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .inventory()?
            .iter()
            .find(|server| server.name == name)
            .map(|_| RebootAck::new(self.id, name)))
    }
}

/// Build a registry and credential store backed by scripted providers,
/// registered in the order given.
pub fn harness(mocks: &[MockProvider]) -> (ProviderRegistry, CredentialStore) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut registry = ProviderRegistry::new();
    let mut credentials = CredentialStore::new();

    for mock in mocks {
        credentials.insert(mock.id, Credentials::empty());
        let template = mock.clone();
        registry.register(mock.id, move |_| -> Result<Box<dyn VpsProvider>> {
            Ok(Box::new(template.clone()))
        });
    }

    (registry, credentials)
}

pub fn acl(doc: serde_json::Value, known: &[&str]) -> AclDocument {
    AclDocument::parse(&doc, known).unwrap()
}
