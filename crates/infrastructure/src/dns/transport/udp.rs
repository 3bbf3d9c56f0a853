//! UDP transport for a single upstream exchange (RFC 1035 §4.2.1).
//!
//! Messages are sent as-is. No TCP retry is attempted on truncation.

use super::ForwardTimeouts;
use dnsm_domain::DomainError;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    /// Sends `message_bytes` and waits for one datagram back from the
    /// server.
    pub async fn exchange(
        &self,
        message_bytes: &[u8],
        timeouts: &ForwardTimeouts,
    ) -> Result<Vec<u8>, DomainError> {
        let server = self.server_addr.to_string();

        let bind_addr = if self.server_addr.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = tokio::time::timeout(timeouts.dial, UdpSocket::bind(bind_addr))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.clone(),
            })?
            .map_err(|e| DomainError::Transport {
                server: server.clone(),
                reason: format!("failed to bind UDP socket: {}", e),
            })?;

        let bytes_sent =
            tokio::time::timeout(timeouts.write, socket.send_to(message_bytes, self.server_addr))
                .await
                .map_err(|_| DomainError::TransportTimeout {
                    server: server.clone(),
                })?
                .map_err(|e| DomainError::Transport {
                    server: server.clone(),
                    reason: format!("send failed: {}", e),
                })?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(timeouts.read, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| DomainError::TransportTimeout {
                    server: server.clone(),
                })?
                .map_err(|e| DomainError::Transport {
                    server: server.clone(),
                    reason: format!("receive failed: {}", e),
                })?;

        if from_addr.ip() != self.server_addr.ip() {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}
