use dnsm_domain::{DomainError, ZoneSnapshot};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::services::RecordStore;

/// Re-reads the record document and swaps in the new record set.
pub struct ReloadRecordsUseCase {
    store: Arc<RecordStore>,
}

impl ReloadRecordsUseCase {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<Arc<ZoneSnapshot>, DomainError> {
        if let Err(e) = self.store.load().await {
            error!(error = %e, "Record document reload failed, keeping previous record set");
            return Err(e);
        }

        let snapshot = self.store.snapshot().await;
        info!(
            version = snapshot.version(),
            records = snapshot.records().len(),
            "Record document reloaded"
        );
        Ok(snapshot)
    }
}
