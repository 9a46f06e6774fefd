//! BitLaunch provider for opsgate
//!
//! Talks to the BitLaunch.io HTTP API with bearer-token authentication.
//! The API has no server-side name filter, so lookups list and filter
//! client-side.

pub mod client;

pub use client::BitLaunchClient;
