pub mod domain;
pub mod record;

pub use domain::{DomainRequest, ListResponse, PageQuery};
pub use record::RecordRequest;
