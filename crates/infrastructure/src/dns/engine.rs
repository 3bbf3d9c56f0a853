use dnsm_application::ports::ZoneSnapshotSource;
use dnsm_domain::DomainError;
use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::forwarding::UpstreamForwarder;
use super::question::raw_question_name;
use super::record_type_map::RecordTypeMapper;
use super::synthesis;
use super::transport::udp::MAX_UDP_RESPONSE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// `host:port` the UDP listener binds to.
    pub bind_addr: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:53".to_string(),
        }
    }
}

enum EngineState {
    Stopped,
    Running {
        local_addr: SocketAddr,
        shutdown: CancellationToken,
        receiver: JoinHandle<()>,
    },
}

/// Answers UDP DNS queries from the current zone snapshot and forwards
/// everything else upstream.
pub struct DnsEngine {
    config: EngineConfig,
    handler: Arc<QueryHandler>,
    state: Mutex<EngineState>,
}

impl DnsEngine {
    pub fn new(
        zones: Arc<dyn ZoneSnapshotSource>,
        forwarder: UpstreamForwarder,
        config: EngineConfig,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(QueryHandler { zones, forwarder }),
            state: Mutex::new(EngineState::Stopped),
        }
    }

    /// Binds the listener and starts serving. Returns the bound address.
    pub async fn start(&self) -> Result<SocketAddr, DomainError> {
        let mut state = self.state.lock().await;
        if let EngineState::Running { local_addr, .. } = &*state {
            return Err(DomainError::Bind(format!(
                "engine already running on {}",
                local_addr
            )));
        }

        let socket = UdpSocket::bind(self.config.bind_addr.as_str())
            .await
            .map_err(|e| DomainError::Bind(format!("{}: {}", self.config.bind_addr, e)))?;
        let local_addr = socket
            .local_addr()
            .map_err(|e| DomainError::Bind(format!("{}: {}", self.config.bind_addr, e)))?;

        let shutdown = CancellationToken::new();
        let receiver = tokio::spawn(receive_loop(
            Arc::new(socket),
            self.handler.clone(),
            shutdown.clone(),
        ));

        info!(addr = %local_addr, "DNS engine listening (UDP)");

        *state = EngineState::Running {
            local_addr,
            shutdown,
            receiver,
        };
        Ok(local_addr)
    }

    /// Stops the receive loop. Queries already being handled still send
    /// their replies. Calling `stop` on a stopped engine does nothing.
    pub async fn stop(&self) {
        let mut state = self.state.lock().await;
        let EngineState::Running {
            local_addr,
            shutdown,
            receiver,
        } = std::mem::replace(&mut *state, EngineState::Stopped)
        else {
            return;
        };

        shutdown.cancel();
        if let Err(e) = receiver.await {
            warn!(error = %e, "DNS receive loop ended abnormally");
        }
        info!(addr = %local_addr, "DNS engine stopped");
    }

    pub async fn local_addr(&self) -> Option<SocketAddr> {
        match &*self.state.lock().await {
            EngineState::Running { local_addr, .. } => Some(*local_addr),
            EngineState::Stopped => None,
        }
    }

    pub async fn is_running(&self) -> bool {
        matches!(&*self.state.lock().await, EngineState::Running { .. })
    }

    /// Builds the reply for one datagram, or `None` when the datagram is not
    /// a DNS message and should be dropped.
    pub async fn handle_request(&self, datagram: &[u8]) -> Option<Vec<u8>> {
        self.handler.handle(datagram).await
    }
}

impl Drop for DnsEngine {
    fn drop(&mut self) {
        if let EngineState::Running { shutdown, .. } = self.state.get_mut() {
            shutdown.cancel();
        }
    }
}

async fn receive_loop(socket: Arc<UdpSocket>, handler: Arc<QueryHandler>, shutdown: CancellationToken) {
    let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            result = socket.recv_from(&mut buf) => {
                let (len, peer) = match result {
                    Ok(received) => received,
                    Err(e) => {
                        warn!(error = %e, "UDP receive failed");
                        continue;
                    }
                };

                let datagram = buf[..len].to_vec();
                let socket = socket.clone();
                let handler = handler.clone();

                tokio::spawn(async move {
                    let Some(reply) = handler.handle(&datagram).await else {
                        return;
                    };
                    if let Err(e) = socket.send_to(&reply, peer).await {
                        warn!(client = %peer, error = %e, "Failed to send DNS reply");
                    }
                });
            }
        }
    }
}

struct QueryHandler {
    zones: Arc<dyn ZoneSnapshotSource>,
    forwarder: UpstreamForwarder,
}

impl QueryHandler {
    async fn handle(&self, datagram: &[u8]) -> Option<Vec<u8>> {
        let request = match Message::from_vec(datagram) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, bytes = datagram.len(), "Dropping unparsable datagram");
                return None;
            }
        };

        let question = echoed_question(&request, datagram);
        let mut reply = reply_skeleton(&request, question.as_ref());

        let Some(query) = question.as_ref() else {
            return encode(&reply, &request, None);
        };

        let qname = query.name().to_ascii();
        let snapshot = self.zones.snapshot().await;

        if snapshot.is_configured(&qname) {
            let record = RecordTypeMapper::from_hickory(query.query_type())
                .and_then(|record_type| snapshot.find_record(&qname, record_type));

            if let Some(answer) = record.and_then(|r| synthesis::answer_for(query.name(), r)) {
                reply.add_answer(answer);
            }

            debug!(
                name = %qname,
                query_type = ?query.query_type(),
                answers = reply.answers().len(),
                "Answered from local records"
            );
            return encode(&reply, &request, Some(query));
        }

        match self.forwarder.forward(datagram, snapshot.upstreams()).await {
            Ok(response) => {
                reply.add_answers(response.answers().iter().cloned());
                reply.add_name_servers(response.name_servers().iter().cloned());
                reply.add_additionals(response.additionals().iter().cloned());
                reply.set_response_code(response.response_code());
                if let Some(edns) = response.extensions() {
                    reply.set_edns(edns.clone());
                }
                debug!(
                    name = %qname,
                    rcode = ?response.response_code(),
                    answers = response.answers().len(),
                    "Forwarded query answered"
                );
            }
            Err(e) => {
                warn!(name = %qname, error = %e, "Forwarding failed, answering SERVFAIL");
                reply.set_response_code(ResponseCode::ServFail);
                reply.set_recursion_available(false);
            }
        }

        encode(&reply, &request, Some(query))
    }
}

/// The first question, with the name spelled exactly as the client sent it.
/// Decoding folds the name to lower case; replies must echo the original
/// spelling.
fn echoed_question(request: &Message, datagram: &[u8]) -> Option<Query> {
    let mut question = request.queries().first()?.clone();
    if let Some(name) = raw_question_name(datagram).filter(|name| name == question.name()) {
        question.set_name(name);
    }
    Some(question)
}

/// Response header mirroring the request: ID, opcode, RD and the echoed
/// question. RA is set.
fn reply_skeleton(request: &Message, question: Option<&Query>) -> Message {
    let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
    reply.set_recursion_desired(request.recursion_desired());
    reply.set_recursion_available(true);
    if let Some(question) = question {
        reply.add_query(question.clone());
    }
    reply
}

fn encode(reply: &Message, request: &Message, question: Option<&Query>) -> Option<Vec<u8>> {
    match serialize(reply) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            error!(error = %e, id = request.id(), "Failed to encode DNS reply");
            let mut fallback = reply_skeleton(request, question);
            fallback.set_response_code(ResponseCode::ServFail);
            serialize(&fallback).ok()
        }
    }
}

fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message
        .emit(&mut encoder)
        .map_err(|e| DomainError::InvalidDnsMessage(format!("failed to serialize reply: {}", e)))?;
    Ok(buf)
}
