use crate::dns::transport::{ForwardTimeouts, UdpTransport};
use dnsm_domain::DomainError;
use hickory_proto::op::Message;
use std::net::{IpAddr, SocketAddr};
use tokio::net::lookup_host;
use tracing::{debug, warn};

const DEFAULT_DNS_PORT: u16 = 53;

/// Sends queries for names that are not served locally to the configured
/// upstream resolvers, in order, until one of them answers.
#[derive(Debug, Clone, Default)]
pub struct UpstreamForwarder {
    timeouts: ForwardTimeouts,
}

impl UpstreamForwarder {
    pub fn new(timeouts: ForwardTimeouts) -> Self {
        Self { timeouts }
    }

    /// Forwards the original query bytes. Each upstream gets exactly one
    /// attempt; a transport error, a timeout, an ID mismatch or an
    /// unparsable reply moves on to the next one.
    pub async fn forward(
        &self,
        request_bytes: &[u8],
        upstreams: &[String],
    ) -> Result<Message, DomainError> {
        if request_bytes.len() < 2 {
            return Err(DomainError::InvalidDnsMessage(
                "query shorter than a DNS header".to_string(),
            ));
        }
        let request_id = u16::from_be_bytes([request_bytes[0], request_bytes[1]]);

        for upstream in upstreams {
            match self.exchange(upstream, request_bytes, request_id).await {
                Ok(response) => {
                    debug!(
                        upstream = %upstream,
                        rcode = ?response.response_code(),
                        answers = response.answers().len(),
                        "Upstream answered"
                    );
                    return Ok(response);
                }
                Err(e) => {
                    warn!(upstream = %upstream, error = %e, "Upstream failed, trying next");
                }
            }
        }

        Err(DomainError::AllUpstreamsFailed)
    }

    async fn exchange(
        &self,
        upstream: &str,
        request_bytes: &[u8],
        request_id: u16,
    ) -> Result<Message, DomainError> {
        let server_addr = resolve_upstream(upstream, &self.timeouts).await?;
        let transport = UdpTransport::new(server_addr);

        let reply = transport.exchange(request_bytes, &self.timeouts).await?;

        let response = Message::from_vec(&reply).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("unparsable reply from {}: {}", upstream, e))
        })?;

        if response.id() != request_id {
            return Err(DomainError::InvalidDnsMessage(format!(
                "reply from {} has ID {} but query had {}",
                upstream,
                response.id(),
                request_id
            )));
        }

        Ok(response)
    }
}

/// Turns an upstream entry into a socket address. Entries without a port
/// use 53; host names are resolved within the dial timeout.
pub async fn resolve_upstream(
    upstream: &str,
    timeouts: &ForwardTimeouts,
) -> Result<SocketAddr, DomainError> {
    let trimmed = upstream.trim();

    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let bare = trimmed.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT));
    }

    let target = if trimmed.contains(':') {
        trimmed.to_string()
    } else {
        format!("{}:{}", trimmed, DEFAULT_DNS_PORT)
    };

    let mut addrs = tokio::time::timeout(timeouts.dial, lookup_host(target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: upstream.to_string(),
        })?
        .map_err(|e| DomainError::Transport {
            server: upstream.to_string(),
            reason: format!("failed to resolve address: {}", e),
        })?;

    addrs.next().ok_or_else(|| DomainError::Transport {
        server: upstream.to_string(),
        reason: "address resolved to nothing".to_string(),
    })
}
