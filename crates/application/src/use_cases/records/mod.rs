mod add;
mod delete;
mod get;
mod update;

pub use add::AddRecordUseCase;
pub use delete::DeleteRecordUseCase;
pub use get::GetRecordsUseCase;
pub use update::UpdateRecordUseCase;

use dnsm_domain::{DomainError, Record, RecordType};

/// Builds a record from request fields. A missing or zero TTL becomes
/// `default_ttl`.
fn build_record(
    name: String,
    record_type: RecordType,
    value: String,
    ttl: Option<u32>,
    default_ttl: u32,
) -> Result<Record, DomainError> {
    let ttl = match ttl {
        Some(ttl) if ttl > 0 => ttl,
        _ => default_ttl,
    };

    let record = Record::new(name.trim(), record_type, value.trim(), ttl);
    record.validate().map_err(DomainError::Validation)?;
    Ok(record)
}
