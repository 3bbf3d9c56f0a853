use dnsm_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::services::RecordStore;

pub struct DeleteRecordUseCase {
    store: Arc<RecordStore>,
}

impl DeleteRecordUseCase {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Removes every record named `record_name` from `domain`.
    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str, record_name: &str) -> Result<(), DomainError> {
        self.store.delete_record(domain, record_name).await?;
        info!(domain = %domain, name = %record_name, "Record deleted");
        Ok(())
    }
}
