use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "no ACL document configured. Provide one via:\n\
        - OPSGATE_ACL_JSON (inline JSON)\n\
        - OPSGATE_ACL_PATH (path to a JSON file)\n\
        - ~/.config/opsgate/acl.json"
    )]
    AclNotFound,

    #[error("ACL document is not valid JSON: {0}")]
    InvalidAclJson(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
