//! Builds wire records from locally configured records.

use dnsm_domain::{Record, RecordType};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, TXT};
use hickory_proto::rr::{Name, RData, Record as WireRecord};
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use tracing::warn;

/// One answer for `record`, owned by the question name `owner`.
///
/// Returns `None` when the stored value cannot be expressed as the record's
/// type (for instance an A record whose value is not an IPv4 literal).
pub fn answer_for(owner: &Name, record: &Record) -> Option<WireRecord> {
    let rdata = match rdata_for(record) {
        Some(rdata) => rdata,
        None => {
            warn!(
                name = %record.name,
                record_type = %record.record_type,
                value = %record.value,
                "Stored record value is not valid for its type, answering without it"
            );
            return None;
        }
    };

    Some(WireRecord::from_rdata(owner.clone(), record.ttl, rdata))
}

fn rdata_for(record: &Record) -> Option<RData> {
    let value = record.value.trim();
    match record.record_type {
        RecordType::A => value.parse::<Ipv4Addr>().ok().map(|ip| RData::A(A(ip))),
        RecordType::AAAA => match value.parse::<IpAddr>().ok()? {
            IpAddr::V6(ip) => Some(RData::AAAA(AAAA(ip))),
            IpAddr::V4(ip) => Some(RData::AAAA(AAAA(ip.to_ipv6_mapped()))),
        },
        RecordType::CNAME => {
            let target = if value.ends_with('.') {
                value.to_string()
            } else {
                format!("{}.", value)
            };
            Name::from_str(&target).ok().map(|name| RData::CNAME(CNAME(name)))
        }
        RecordType::TXT => Some(RData::TXT(TXT::new(txt_chunks(&record.value)))),
    }
}

/// Longest character-string a TXT record can carry.
const MAX_TXT_CHUNK: usize = 255;

/// Splits a TXT value into character-strings of at most 255 bytes, never
/// inside a UTF-8 sequence.
fn txt_chunks(value: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for ch in value.chars() {
        if current.len() + ch.len_utf8() > MAX_TXT_CHUNK {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}
