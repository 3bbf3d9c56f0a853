use dnsm_domain::{Domain, DomainError};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::services::RecordStore;

/// Creates a domain, or replaces it wholesale (records included) when one
/// with the same name exists.
pub struct UpsertDomainUseCase {
    store: Arc<RecordStore>,
}

impl UpsertDomainUseCase {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, domain), fields(domain = %domain.name))]
    pub async fn execute(&self, domain: Domain) -> Result<Domain, DomainError> {
        let name = domain.name.trim().to_string();
        let domain = Domain::new(name, domain.records);

        for record in &domain.records {
            record.validate().map_err(DomainError::Validation)?;
        }

        self.store.add_or_update_domain(domain.clone()).await?;

        info!(
            domain = %domain.name,
            records = domain.records.len(),
            "Domain saved"
        );

        Ok(domain)
    }
}
