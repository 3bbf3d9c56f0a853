use dnsm_api::{
    state::{DomainUseCases, RecordUseCases},
    AppState,
};
use dnsm_application::{
    services::RecordStore,
    use_cases::{
        AddRecordUseCase, DeleteDomainUseCase, DeleteRecordUseCase, GetDomainsUseCase,
        GetRecordsUseCase, ReloadRecordsUseCase, UpdateRecordUseCase, UpsertDomainUseCase,
    },
};
use dnsm_domain::Config;
use dnsm_infrastructure::{
    dns::{DnsEngine, EngineConfig, UpstreamForwarder},
    persistence::TomlRecordDocument,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the process serves, wired around one shared record store.
pub struct Services {
    pub engine: Arc<DnsEngine>,
    pub reload: Arc<ReloadRecordsUseCase>,
    pub app_state: AppState,
}

impl Services {
    pub async fn new(config: &Config, document_path: &str) -> anyhow::Result<Self> {
        let document = Arc::new(TomlRecordDocument::new(document_path, config.clone()));
        let store = Arc::new(RecordStore::new(document));
        store.load().await?;

        let snapshot = store.snapshot().await;
        info!(
            domains = store.list_domains().await.len(),
            records = snapshot.records().len(),
            upstreams = snapshot.upstreams().len(),
            "Record store ready"
        );

        let engine = Arc::new(DnsEngine::new(
            store.clone(),
            UpstreamForwarder::default(),
            EngineConfig {
                bind_addr: config.server.bind_address(),
            },
        ));

        let default_ttl = config.server.default_ttl;
        let api_key = config
            .web
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(Arc::from);
        if api_key.is_none() {
            warn!("No web.api_key configured; management API writes are unauthenticated");
        }
        let reload = Arc::new(ReloadRecordsUseCase::new(store.clone()));

        let app_state = AppState {
            domains: DomainUseCases {
                get: Arc::new(GetDomainsUseCase::new(store.clone())),
                upsert: Arc::new(UpsertDomainUseCase::new(store.clone())),
                delete: Arc::new(DeleteDomainUseCase::new(store.clone())),
            },
            records: RecordUseCases {
                get: Arc::new(GetRecordsUseCase::new(store.clone())),
                add: Arc::new(AddRecordUseCase::new(store.clone(), default_ttl)),
                update: Arc::new(UpdateRecordUseCase::new(store.clone(), default_ttl)),
                delete: Arc::new(DeleteRecordUseCase::new(store.clone())),
            },
            reload: reload.clone(),
            default_ttl,
            api_key,
        };

        Ok(Self {
            engine,
            reload,
            app_state,
        })
    }
}
