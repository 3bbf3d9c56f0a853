pub mod record;
pub mod record_type;

pub use record::{Record, DEFAULT_RECORD_TTL};
pub use record_type::RecordType;
