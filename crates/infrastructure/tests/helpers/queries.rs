use async_trait::async_trait;
use dnsm_application::ports::ZoneSnapshotSource;
use dnsm_domain::{Domain, ZoneSnapshot};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use std::sync::Arc;

/// Fixed snapshot for engine tests.
pub struct StaticZones {
    snapshot: Arc<ZoneSnapshot>,
}

impl StaticZones {
    pub fn new(domains: &[Domain], upstreams: &[String]) -> Arc<Self> {
        Arc::new(Self {
            snapshot: Arc::new(ZoneSnapshot::build(1, domains, upstreams)),
        })
    }
}

#[async_trait]
impl ZoneSnapshotSource for StaticZones {
    async fn snapshot(&self) -> Arc<ZoneSnapshot> {
        self.snapshot.clone()
    }
}

pub fn build_query(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), record_type));
    message.to_vec().unwrap()
}

pub fn parse_reply(bytes: &[u8]) -> Message {
    Message::from_vec(bytes).unwrap()
}
