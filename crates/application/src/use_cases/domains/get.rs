use dnsm_domain::{Domain, DomainError, DomainPage, PageRequest};
use std::sync::Arc;
use tracing::instrument;

use crate::services::RecordStore;

pub struct GetDomainsUseCase {
    store: Arc<RecordStore>,
}

impl GetDomainsUseCase {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Vec<String> {
        self.store.list_domains().await
    }

    #[instrument(skip(self))]
    pub async fn get_page(&self, request: PageRequest) -> DomainPage {
        self.store.list_domains_paged(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> Result<Domain, DomainError> {
        self.store.get_domain(name).await
    }
}
