pub mod engine;
pub mod forwarding;
mod question;
pub mod record_type_map;
pub mod synthesis;
pub mod transport;

pub use engine::{DnsEngine, EngineConfig};
pub use forwarding::{ForwardTimeouts, UpstreamForwarder};
pub use record_type_map::RecordTypeMapper;
