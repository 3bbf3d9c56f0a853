//! dnsm domain layer: records, domains, name matching and the resolution
//! snapshot.
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod matcher;
pub mod snapshot;
pub mod zone;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{Record, RecordType, DEFAULT_RECORD_TTL};
pub use errors::DomainError;
pub use snapshot::ZoneSnapshot;
pub use zone::{Domain, DomainInfo, DomainPage, PageRequest};
