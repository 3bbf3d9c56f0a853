use async_trait::async_trait;
use dnsm_domain::{
    Domain, DomainError, DomainInfo, DomainPage, PageRequest, Record, ZoneSnapshot,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::ports::{RecordDocument, ZoneSnapshotSource};

struct StoreState {
    domains: HashMap<String, Domain>,
    upstreams: Vec<String>,
    snapshot: Arc<ZoneSnapshot>,
}

impl StoreState {
    fn next_snapshot(&self, domains: &HashMap<String, Domain>, upstreams: &[String]) -> Arc<ZoneSnapshot> {
        Arc::new(ZoneSnapshot::build(
            self.snapshot.version() + 1,
            domains.values(),
            upstreams,
        ))
    }
}

/// Authoritative in-memory record set, kept in step with the record
/// document.
///
/// Mutations are computed on a copy of the domain map, written through the
/// [`RecordDocument`] port and only then committed. A failed write leaves
/// the in-memory state untouched. Every load and every committed mutation
/// publishes a fresh [`ZoneSnapshot`].
pub struct RecordStore {
    document: Arc<dyn RecordDocument>,
    state: RwLock<StoreState>,
}

impl RecordStore {
    pub fn new(document: Arc<dyn RecordDocument>) -> Self {
        Self {
            document,
            state: RwLock::new(StoreState {
                domains: HashMap::new(),
                upstreams: Vec::new(),
                snapshot: Arc::new(ZoneSnapshot::default()),
            }),
        }
    }

    /// Reads the document and replaces the record set and the upstream list.
    /// On failure the previous state stays in place.
    pub async fn load(&self) -> Result<(), DomainError> {
        let mut state = self.state.write().await;

        let config = self.document.read().await.map_err(|e| match e {
            DomainError::Load(_) => e,
            other => DomainError::Load(other.to_string()),
        })?;

        let mut domains = HashMap::with_capacity(config.domains.len());
        for domain in config.domains {
            domains.insert(domain.name.clone(), domain);
        }

        let snapshot = state.next_snapshot(&domains, &config.upstream);
        let record_count = snapshot.records().len();

        state.domains = domains;
        state.upstreams = config.upstream;
        state.snapshot = snapshot;

        info!(
            domains = state.domains.len(),
            records = record_count,
            upstreams = state.upstreams.len(),
            version = state.snapshot.version(),
            "Record set loaded"
        );

        Ok(())
    }

    pub async fn add_or_update_domain(&self, domain: Domain) -> Result<(), DomainError> {
        Domain::validate_name(&domain.name).map_err(DomainError::Validation)?;

        let mut state = self.state.write().await;
        let mut domains = state.domains.clone();
        domains.insert(domain.name.clone(), domain);

        self.commit(&mut state, domains).await
    }

    pub async fn delete_domain(&self, name: &str) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.domains.contains_key(name) {
            return Err(domain_not_found(name));
        }

        let mut domains = state.domains.clone();
        domains.remove(name);

        self.commit(&mut state, domains).await
    }

    pub async fn get_domain(&self, name: &str) -> Result<Domain, DomainError> {
        let state = self.state.read().await;
        state
            .domains
            .get(name)
            .cloned()
            .ok_or_else(|| domain_not_found(name))
    }

    /// Appends `record`; a record with the same name and type already in the
    /// domain is a conflict.
    pub async fn add_record(&self, domain_name: &str, record: Record) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let domain = state
            .domains
            .get(domain_name)
            .ok_or_else(|| domain_not_found(domain_name))?;

        if domain.has_record_key(&record) {
            return Err(DomainError::Conflict(format!(
                "record '{}' of type {} already exists in domain '{}'",
                record.name, record.record_type, domain_name
            )));
        }

        let mut domains = state.domains.clone();
        if let Some(domain) = domains.get_mut(domain_name) {
            domain.records.push(record);
        }

        self.commit(&mut state, domains).await
    }

    /// Replaces the first record named `record_name`. The replacement may
    /// carry a different name or type.
    pub async fn update_record(
        &self,
        domain_name: &str,
        record_name: &str,
        record: Record,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let domain = state
            .domains
            .get(domain_name)
            .ok_or_else(|| domain_not_found(domain_name))?;

        let index = domain
            .position_of(record_name)
            .ok_or_else(|| record_not_found(domain_name, record_name))?;

        let mut domains = state.domains.clone();
        if let Some(domain) = domains.get_mut(domain_name) {
            domain.records[index] = record;
        }

        self.commit(&mut state, domains).await
    }

    /// Removes every record named `record_name`, whatever its type.
    pub async fn delete_record(&self, domain_name: &str, record_name: &str) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let domain = state
            .domains
            .get(domain_name)
            .ok_or_else(|| domain_not_found(domain_name))?;

        if domain.position_of(record_name).is_none() {
            return Err(record_not_found(domain_name, record_name));
        }

        let mut domains = state.domains.clone();
        if let Some(domain) = domains.get_mut(domain_name) {
            domain.records.retain(|r| r.name != record_name);
        }

        self.commit(&mut state, domains).await
    }

    pub async fn get_records(&self, domain_name: &str) -> Result<Vec<Record>, DomainError> {
        let state = self.state.read().await;
        state
            .domains
            .get(domain_name)
            .map(|d| d.records.clone())
            .ok_or_else(|| domain_not_found(domain_name))
    }

    /// All domain names, in no particular order.
    pub async fn list_domains(&self) -> Vec<String> {
        let state = self.state.read().await;
        state.domains.keys().cloned().collect()
    }

    pub async fn list_domains_paged(&self, request: PageRequest) -> DomainPage {
        let state = self.state.read().await;

        let mut infos: Vec<DomainInfo> = state.domains.values().map(Domain::info).collect();
        infos.sort_by_cached_key(|info| info.name.to_lowercase());

        let total = infos.len();
        let domains = match request.bounds(total) {
            Some((start, end)) => infos.drain(start..end).collect(),
            None => Vec::new(),
        };

        DomainPage {
            total: total as u64,
            domains,
        }
    }

    pub async fn snapshot(&self) -> Arc<ZoneSnapshot> {
        self.state.read().await.snapshot.clone()
    }

    async fn commit(
        &self,
        state: &mut StoreState,
        domains: HashMap<String, Domain>,
    ) -> Result<(), DomainError> {
        let mut ordered: Vec<Domain> = domains.values().cloned().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));

        if let Err(e) = self.document.write_domains(&ordered).await {
            error!(error = %e, "Failed to persist record document");
            return Err(match e {
                DomainError::Persistence(_) => e,
                other => DomainError::Persistence(other.to_string()),
            });
        }

        let snapshot = state.next_snapshot(&domains, &state.upstreams);
        state.domains = domains;
        state.snapshot = snapshot;

        debug!(version = state.snapshot.version(), "Published zone snapshot");
        Ok(())
    }
}

#[async_trait]
impl ZoneSnapshotSource for RecordStore {
    async fn snapshot(&self) -> Arc<ZoneSnapshot> {
        RecordStore::snapshot(self).await
    }
}

fn domain_not_found(name: &str) -> DomainError {
    DomainError::NotFound(format!("domain '{}'", name))
}

fn record_not_found(domain_name: &str, record_name: &str) -> DomainError {
    DomainError::NotFound(format!(
        "record '{}' in domain '{}'",
        record_name, domain_name
    ))
}
