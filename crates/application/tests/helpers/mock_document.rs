use async_trait::async_trait;
use dnsm_application::ports::RecordDocument;
use dnsm_domain::{Config, Domain, DomainError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory record document. Writes can be switched to fail, and reads
/// can be switched to fail independently.
pub struct MockRecordDocument {
    config: Mutex<Config>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MockRecordDocument {
    pub fn new() -> Self {
        Self::with_domains(Vec::new())
    }

    pub fn with_domains(domains: Vec<Domain>) -> Self {
        let config = Config {
            upstream: vec!["127.0.0.1:5300".to_string()],
            domains,
            ..Config::default()
        };
        Self {
            config: Mutex::new(config),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn persisted_domains(&self) -> Vec<Domain> {
        self.config.lock().unwrap().domains.clone()
    }

    /// Simulates an operator editing the file by hand.
    pub fn replace_domains(&self, domains: Vec<Domain>) {
        self.config.lock().unwrap().domains = domains;
    }
}

#[async_trait]
impl RecordDocument for MockRecordDocument {
    async fn read(&self) -> Result<Config, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::Load("mock read failure".to_string()));
        }
        Ok(self.config.lock().unwrap().clone())
    }

    async fn write_domains(&self, domains: &[Domain]) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("mock write failure".to_string()));
        }
        self.config.lock().unwrap().domains = domains.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
