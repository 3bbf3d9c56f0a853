use dnsm_domain::{DomainError, Record, RecordType};
use std::sync::Arc;
use tracing::{info, instrument};

use super::build_record;
use crate::services::RecordStore;

pub struct UpdateRecordUseCase {
    store: Arc<RecordStore>,
    default_ttl: u32,
}

impl UpdateRecordUseCase {
    pub fn new(store: Arc<RecordStore>, default_ttl: u32) -> Self {
        Self { store, default_ttl }
    }

    /// Replaces the first record named `record_name` in `domain`.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        domain: &str,
        record_name: &str,
        name: String,
        record_type: RecordType,
        value: String,
        ttl: Option<u32>,
    ) -> Result<Record, DomainError> {
        let record = build_record(name, record_type, value, ttl, self.default_ttl)?;

        self.store
            .update_record(domain, record_name, record.clone())
            .await?;

        info!(
            domain = %domain,
            previous = %record_name,
            name = %record.name,
            record_type = %record.record_type,
            "Record updated"
        );

        Ok(record)
    }
}
