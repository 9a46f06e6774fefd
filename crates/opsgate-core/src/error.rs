//! Core error types

use crate::authorize::Decision;
use thiserror::Error;

/// ACL document parse errors
///
/// A document that fails any of these checks is rejected wholesale; a
/// partially-applied ACL cannot be trusted. Messages name the offending
/// key at most; allow-list contents never appear in `Display` output.
#[derive(Error, Debug)]
pub enum AclError {
    #[error("ACL root must be a JSON object")]
    InvalidRoot,

    #[error("ACL 'admins' must be an array of integer user ids")]
    InvalidAdmins,

    #[error("ACL 'users' must be an object keyed by user id")]
    InvalidUsers,

    #[error("ACL user key is not an integer id: {0}")]
    InvalidUserKey(String),

    #[error("ACL grant references an unregistered provider: {0}")]
    UnknownProvider(String),

    #[error("ACL grant for provider '{0}' is malformed")]
    InvalidGrant(String),

    #[error("ACL allow-list for provider '{0}' contains a duplicate server name")]
    DuplicateServer(String),

    #[error("ACL allow-list for provider '{0}' contains an empty server name")]
    EmptyServerName(String),

    #[error("ACL document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Command target parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("empty server name")]
    EmptyServerName,
}

/// Resolution failures
///
/// `Denied` deliberately renders without detail; the caller picks a
/// user-facing message from the wrapped [`Decision`] so that denials
/// never reveal providers or servers outside the user's grants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("access denied")]
    Denied(Decision),
}
