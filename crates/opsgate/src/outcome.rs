//! Typed command outcomes
//!
//! The dispatcher returns plain data; rendering user-facing text is the
//! calling surface's job. Partial failures ride along with successes so
//! the caller can report both.

use opsgate_cloud::{CloudError, RebootAck, ServerSummary};

/// One provider's failure during a dispatch, recorded without aborting
/// the walk.
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: String,
    pub error: CloudError,
}

impl ProviderFailure {
    pub fn new(provider: impl Into<String>, error: CloudError) -> Self {
        Self {
            provider: provider.into(),
            error,
        }
    }
}

/// Terminal result of a `find` dispatch
#[derive(Debug)]
pub enum FindOutcome {
    /// First provider that knew the server wins; failures seen on the
    /// way are recorded but not fatal.
    Found {
        provider: String,
        server: ServerSummary,
        failures: Vec<ProviderFailure>,
    },

    /// Every candidate was examined cleanly and none had the server.
    NotFound { searched: Vec<String> },

    /// No candidate had the server, and at least one could not be
    /// examined, so the absence is not trustworthy.
    Unavailable {
        searched: Vec<String>,
        failures: Vec<ProviderFailure>,
    },
}

/// Terminal result of a `reboot` dispatch
#[derive(Debug)]
pub enum RebootOutcome {
    Initiated {
        provider: String,
        ack: RebootAck,
        failures: Vec<ProviderFailure>,
    },

    NotFound { searched: Vec<String> },

    /// The reboot request timed out client-side. It may or may not have
    /// been applied; the walk stops here so the reboot is never issued
    /// to a second provider.
    Ambiguous {
        provider: String,
        failures: Vec<ProviderFailure>,
    },

    Unavailable {
        searched: Vec<String>,
        failures: Vec<ProviderFailure>,
    },
}

/// One provider's slice of a `list` aggregation
#[derive(Debug)]
pub struct ProviderListing {
    pub provider: String,
    pub servers: Vec<ServerSummary>,
}

/// Aggregate result of a `list` dispatch
///
/// Listings and failures together cover exactly the authorized provider
/// set, in registry order; no provider is silently dropped.
#[derive(Debug, Default)]
pub struct ListOutcome {
    pub listings: Vec<ProviderListing>,
    pub failures: Vec<ProviderFailure>,
}

impl ListOutcome {
    /// Zero servers and zero failures: the providers answered and there
    /// is simply nothing to show.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty() && self.listings.iter().all(|l| l.servers.is_empty())
    }

    /// Every queried provider failed.
    pub fn all_failed(&self) -> bool {
        self.listings.is_empty() && !self.failures.is_empty()
    }

    pub fn total_servers(&self) -> usize {
        self.listings.iter().map(|l| l.servers.len()).sum()
    }
}
