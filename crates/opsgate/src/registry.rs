//! Builtin provider registration
//!
//! The supported provider set is fixed per build. Registration order is
//! the order candidates are tried in during auto-detection, so it is
//! part of observable behavior. Append new providers, do not reorder.

use opsgate_cloud::{ProviderRegistry, VpsProvider};
use opsgate_cloud_bitlaunch::BitLaunchClient;
use opsgate_cloud_kamatera::KamateraClient;

/// Registry with every compiled-in provider.
pub fn builtin_registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    registry.register(
        "bitlaunch",
        |credentials| -> opsgate_cloud::Result<Box<dyn VpsProvider>> {
            Ok(Box::new(BitLaunchClient::from_credentials(credentials)?))
        },
    );

    registry.register(
        "kamatera",
        |credentials| -> opsgate_cloud::Result<Box<dyn VpsProvider>> {
            Ok(Box::new(KamateraClient::from_credentials(credentials)?))
        },
    );

    registry
}
