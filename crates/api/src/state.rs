use dnsm_application::use_cases::{
    AddRecordUseCase, DeleteDomainUseCase, DeleteRecordUseCase, GetDomainsUseCase,
    GetRecordsUseCase, ReloadRecordsUseCase, UpdateRecordUseCase, UpsertDomainUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub domains: DomainUseCases,
    pub records: RecordUseCases,
    pub reload: Arc<ReloadRecordsUseCase>,
    /// TTL applied to records submitted without one.
    pub default_ttl: u32,
    /// Required in `X-Api-Key` on mutating requests when set.
    pub api_key: Option<Arc<str>>,
}

#[derive(Clone)]
pub struct DomainUseCases {
    pub get: Arc<GetDomainsUseCase>,
    pub upsert: Arc<UpsertDomainUseCase>,
    pub delete: Arc<DeleteDomainUseCase>,
}

#[derive(Clone)]
pub struct RecordUseCases {
    pub get: Arc<GetRecordsUseCase>,
    pub add: Arc<AddRecordUseCase>,
    pub update: Arc<UpdateRecordUseCase>,
    pub delete: Arc<DeleteRecordUseCase>,
}
