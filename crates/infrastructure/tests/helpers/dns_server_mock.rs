use hickory_proto::op::{Edns, Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock upstream treats each query.
#[derive(Debug, Clone, Copy)]
pub enum MockReply {
    /// One A record for the question name, TTL 60.
    Answer(Ipv4Addr),
    /// Like `Answer`, plus an OPT record advertising this payload size.
    AnswerWithEdns(Ipv4Addr, u16),
    /// No answers, the given response code.
    Rcode(ResponseCode),
    /// Never replies.
    Silent,
    /// Replies with a different message ID.
    WrongId,
    /// Replies with bytes that are not a DNS message.
    Garbage,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(reply: MockReply) -> Self {
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
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_response(&buf[..len], reply) {
                                let _ = socket.send_to(&response, peer).await;
                            }
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

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn upstream(&self) -> String {
        self.addr.to_string()
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    fn build_response(query: &[u8], reply: MockReply) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;

        let id = match reply {
            MockReply::Silent => return None,
            MockReply::Garbage => return Some(vec![0xde, 0xad, 0xbe, 0xef]),
            MockReply::WrongId => request.id().wrapping_add(1),
            _ => request.id(),
        };

        let mut response = Message::new(id, MessageType::Response, request.op_code());
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        if let Some(query) = request.queries().first() {
            response.add_query(query.clone());
        }

        match reply {
            MockReply::Answer(ip) | MockReply::AnswerWithEdns(ip, _) => {
                if let MockReply::AnswerWithEdns(_, max_payload) = reply {
                    let mut edns = Edns::new();
                    edns.set_max_payload(max_payload);
                    response.set_edns(edns);
                }
                if let Some(query) = request.queries().first() {
                    response.add_answer(Record::from_rdata(
                        query.name().clone(),
                        60,
                        RData::A(A(ip)),
                    ));
                }
            }
            MockReply::Rcode(code) => {
                response.set_response_code(code);
            }
            _ => {}
        }

        response.to_vec().ok()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
