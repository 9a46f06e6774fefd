//! Opsgate VPS provider abstraction
//!
//! This crate defines the provider abstraction the opsgate dispatcher works
//! against, enabling chat-originated commands to run unchanged across
//! multiple VPS backends.
//!
//! # Supported Providers
//!
//! - **BitLaunch**: servers via the BitLaunch.io HTTP API
//! - **Kamatera**: servers via the Kamatera CloudCLI HTTP API
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               opsgate dispatcher                 │
//! │            (list / find / reboot)                │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                opsgate-cloud                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          Provider Abstraction             │   │
//! │  │  trait VpsProvider { ... }                │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │   Registry   │  │ Credentials  │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │   bitlaunch   │ │   kamatera    │
//! │   provider    │ │   provider    │
//! └───────────────┘ └───────────────┘
//! ```

pub mod credentials;
pub mod error;
pub mod provider;
pub mod registry;
pub mod server;

// Re-exports
pub use credentials::Credentials;
pub use error::{CloudError, Result};
pub use provider::{RebootAck, VpsProvider};
pub use registry::ProviderRegistry;
pub use server::{ServerStatus, ServerSummary};
