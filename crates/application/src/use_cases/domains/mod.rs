mod delete;
mod get;
mod upsert;

pub use delete::DeleteDomainUseCase;
pub use get::GetDomainsUseCase;
pub use upsert::UpsertDomainUseCase;
