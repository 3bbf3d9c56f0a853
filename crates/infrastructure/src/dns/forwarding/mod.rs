mod forwarder;

pub use crate::dns::transport::ForwardTimeouts;
pub use forwarder::{resolve_upstream, UpstreamForwarder};
