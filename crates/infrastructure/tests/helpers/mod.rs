#![allow(dead_code)]

mod dns_server_mock;
mod queries;

pub use dns_server_mock::{MockDnsServer, MockReply};
pub use queries::{build_query, parse_reply, StaticZones};
