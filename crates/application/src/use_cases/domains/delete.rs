use dnsm_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::services::RecordStore;

pub struct DeleteDomainUseCase {
    store: Arc<RecordStore>,
}

impl DeleteDomainUseCase {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, name: &str) -> Result<(), DomainError> {
        self.store.delete_domain(name).await?;
        info!(domain = %name, "Domain deleted");
        Ok(())
    }
}
