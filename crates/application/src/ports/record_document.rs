use async_trait::async_trait;
use dnsm_domain::{Config, Domain, DomainError};

/// Port for the on-disk document that carries the record set alongside the
/// rest of the configuration.
#[async_trait]
pub trait RecordDocument: Send + Sync {
    /// Reads and fully parses the document. Failures are reported as
    /// `DomainError::Load`.
    async fn read(&self) -> Result<Config, DomainError>;

    /// Replaces the `domains` section and leaves every other section as it
    /// was. Failures are reported as `DomainError::Persistence`.
    async fn write_domains(&self, domains: &[Domain]) -> Result<(), DomainError>;
}
