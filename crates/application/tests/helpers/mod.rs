#![allow(dead_code)]

mod mock_document;

pub use mock_document::MockRecordDocument;

use dnsm_domain::{Domain, Record, RecordType};

pub fn a_record(name: &str, ip: &str) -> Record {
    Record::new(name, RecordType::A, ip, 300)
}

pub fn domain(name: &str, records: Vec<Record>) -> Domain {
    Domain::new(name, records)
}
