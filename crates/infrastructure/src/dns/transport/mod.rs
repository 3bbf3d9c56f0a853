pub mod udp;

use std::time::Duration;

pub use udp::UdpTransport;

/// Per-exchange deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardTimeouts {
    /// Resolving the upstream address and binding the local socket.
    pub dial: Duration,
    pub write: Duration,
    pub read: Duration,
}

impl Default for ForwardTimeouts {
    fn default() -> Self {
        Self {
            dial: Duration::from_secs(3),
            write: Duration::from_secs(5),
            read: Duration::from_secs(5),
        }
    }
}
