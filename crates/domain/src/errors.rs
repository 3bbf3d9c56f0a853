use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Failed to persist record document: {0}")]
    Persistence(String),

    #[error("Failed to load record document: {0}")]
    Load(String),

    #[error("Failed to bind DNS listener: {0}")]
    Bind(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("All upstream servers failed")]
    AllUpstreamsFailed,
}
