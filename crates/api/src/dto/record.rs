use dnsm_domain::{DomainError, Record, RecordType};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RecordRequest {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub value: String,
    pub ttl: Option<u32>,
}

impl RecordRequest {
    pub fn parse_type(&self) -> Result<RecordType, DomainError> {
        if self.record_type.trim().is_empty() {
            return Err(DomainError::Validation(
                "Record type cannot be empty".to_string(),
            ));
        }
        self.record_type
            .parse::<RecordType>()
            .map_err(DomainError::Validation)
    }

    pub fn into_record(self, default_ttl: u32) -> Result<Record, DomainError> {
        let record_type = self.parse_type()?;
        let ttl = match self.ttl {
            Some(ttl) if ttl > 0 => ttl,
            _ => default_ttl,
        };
        Ok(Record::new(self.name, record_type, self.value, ttl))
    }
}
