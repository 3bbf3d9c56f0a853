use dnsm_domain::{Domain, DomainError, PageRequest};
use serde::{Deserialize, Serialize};

use super::record::RecordRequest;

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Debug, Deserialize)]
pub struct DomainRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub records: Vec<RecordRequest>,
}

impl DomainRequest {
    /// Records without a TTL get `default_ttl`.
    pub fn into_domain(self, default_ttl: u32) -> Result<Domain, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Domain name cannot be empty".to_string(),
            ));
        }

        let records = self
            .records
            .into_iter()
            .map(|r| r.into_record(default_ttl))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Domain::new(self.name, records))
    }
}

/// Raw `page` / `page_size` query parameters. Invalid values fall back to
/// the defaults rather than rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PageQuery {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.page_size.as_deref())
    }
}
