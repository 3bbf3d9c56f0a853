use dnsm_domain::{DomainError, Record, RecordType};
use std::sync::Arc;
use tracing::{info, instrument};

use super::build_record;
use crate::services::RecordStore;

pub struct AddRecordUseCase {
    store: Arc<RecordStore>,
    default_ttl: u32,
}

impl AddRecordUseCase {
    pub fn new(store: Arc<RecordStore>, default_ttl: u32) -> Self {
        Self { store, default_ttl }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        domain: &str,
        name: String,
        record_type: RecordType,
        value: String,
        ttl: Option<u32>,
    ) -> Result<Record, DomainError> {
        let record = build_record(name, record_type, value, ttl, self.default_ttl)?;

        self.store.add_record(domain, record.clone()).await?;

        info!(
            domain = %domain,
            name = %record.name,
            record_type = %record.record_type,
            value = %record.value,
            ttl = record.ttl,
            "Record added"
        );

        Ok(record)
    }
}
