//! Kamatera provider for opsgate
//!
//! Talks to the Kamatera CloudCLI HTTP API. Unlike BitLaunch, the
//! backend supports server-side name filtering, which lookups use.

pub mod client;

pub use client::KamateraClient;
