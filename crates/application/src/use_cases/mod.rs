pub mod config;
pub mod domains;
pub mod records;

pub use config::ReloadRecordsUseCase;
pub use domains::{DeleteDomainUseCase, GetDomainsUseCase, UpsertDomainUseCase};
pub use records::{AddRecordUseCase, DeleteRecordUseCase, GetRecordsUseCase, UpdateRecordUseCase};
