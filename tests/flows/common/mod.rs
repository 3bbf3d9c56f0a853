#![allow(dead_code)]

use dnsm_application::services::RecordStore;
use dnsm_domain::Config;
use dnsm_infrastructure::dns::{DnsEngine, EngineConfig, ForwardTimeouts, UpstreamForwarder};
use dnsm_infrastructure::persistence::TomlRecordDocument;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// A running engine backed by a real TOML document on disk.
pub struct Stack {
    pub dir: tempfile::TempDir,
    pub path: PathBuf,
    pub store: Arc<RecordStore>,
    pub engine: DnsEngine,
    pub addr: SocketAddr,
}

impl Stack {
    pub async fn start(document: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dnsm.toml");
        std::fs::write(&path, document).unwrap();

        let store = Arc::new(RecordStore::new(Arc::new(TomlRecordDocument::new(
            &path,
            Config::default(),
        ))));
        store.load().await.unwrap();

        let engine = DnsEngine::new(
            store.clone(),
            UpstreamForwarder::new(ForwardTimeouts {
                dial: Duration::from_millis(500),
                write: Duration::from_millis(500),
                read: Duration::from_millis(300),
            }),
            EngineConfig {
                bind_addr: "127.0.0.1:0".to_string(),
            },
        );
        let addr = engine.start().await.unwrap();

        Self {
            dir,
            path,
            store,
            engine,
            addr,
        }
    }

    pub async fn query(&self, id: u16, name: &str, record_type: RecordType) -> Message {
        query(self.addr, id, name, record_type).await
    }
}

pub fn document(upstreams: &[String], domains: &str) -> String {
    let upstreams = upstreams
        .iter()
        .map(|u| format!("\"{}\"", u))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "upstream = [{}]\n\n[server]\nport = 5353\n\n[login]\nusername = \"admin\"\n\n{}",
        upstreams, domains
    )
}

pub async fn query(addr: SocketAddr, id: u16, name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));

    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(&message.to_vec().unwrap(), addr).await.unwrap();

    let mut buf = vec![0u8; 4096];
    let (len, _) = tokio::time::timeout(Duration::from_secs(3), socket.recv_from(&mut buf))
        .await
        .expect("no reply from engine")
        .unwrap();
    Message::from_vec(&buf[..len]).unwrap()
}

pub fn first_a(reply: &Message) -> Option<Ipv4Addr> {
    reply.answers().iter().find_map(|r| match r.data() {
        RData::A(a) => Some(a.0),
        _ => None,
    })
}

pub fn read_document(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

/// Upstream stand-in. `None` never replies.
pub struct Upstream {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl Upstream {
    pub async fn answering(ip: Ipv4Addr) -> Self {
        Self::start(Some(ip)).await
    }

    pub async fn silent() -> Self {
        Self::start(None).await
    }

    async fn start(answer: Option<Ipv4Addr>) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let received = Arc::new(AtomicUsize::new(0));
        let counter = received.clone();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        let Some(ip) = answer else { continue };
                        let Ok(request) = Message::from_vec(&buf[..len]) else { continue };

                        let mut response =
                            Message::new(request.id(), MessageType::Response, request.op_code());
                        response.set_recursion_available(true);
                        if let Some(q) = request.queries().first() {
                            response.add_query(q.clone());
                            if q.query_type() == RecordType::A {
                                response.add_answer(Record::from_rdata(
                                    q.name().clone(),
                                    60,
                                    RData::A(A(ip)),
                                ));
                            } else {
                                response.set_response_code(ResponseCode::NXDomain);
                            }
                        }
                        if let Ok(bytes) = response.to_vec() {
                            let _ = socket.send_to(&bytes, peer).await;
                        }
                    }
                }
            }
        });

        Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn upstream(&self) -> String {
        self.addr.to_string()
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }
}

impl Drop for Upstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
