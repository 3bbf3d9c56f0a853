use async_trait::async_trait;
use dnsm_domain::ZoneSnapshot;
use std::sync::Arc;

/// Read side consumed by the resolution path.
#[async_trait]
pub trait ZoneSnapshotSource: Send + Sync {
    async fn snapshot(&self) -> Arc<ZoneSnapshot>;
}
