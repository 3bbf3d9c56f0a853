use dnsm_domain::{DomainError, Record};
use std::sync::Arc;
use tracing::instrument;

use crate::services::RecordStore;

pub struct GetRecordsUseCase {
    store: Arc<RecordStore>,
}

impl GetRecordsUseCase {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<Vec<Record>, DomainError> {
        self.store.get_records(domain).await
    }
}
