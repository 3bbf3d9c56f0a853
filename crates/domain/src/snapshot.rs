use std::sync::Arc;

use crate::dns_record::{Record, RecordType};
use crate::matcher::{matches, same_name};
use crate::zone::Domain;

/// Immutable view of the local record set consulted by the resolution path.
///
/// A new snapshot is published after every load and every successful
/// mutation; `version` increases monotonically within a process.
#[derive(Debug, Clone, Default)]
pub struct ZoneSnapshot {
    version: u64,
    records: Arc<[Record]>,
    upstreams: Arc<[String]>,
}

impl ZoneSnapshot {
    /// Flattens `domains` in name order, keeping each domain's record order.
    pub fn build<'a>(
        version: u64,
        domains: impl IntoIterator<Item = &'a Domain>,
        upstreams: &[String],
    ) -> Self {
        let mut domains: Vec<&Domain> = domains.into_iter().collect();
        domains.sort_by(|a, b| a.name.cmp(&b.name));

        let records: Vec<Record> = domains
            .into_iter()
            .flat_map(|d| d.records.iter().cloned())
            .collect();

        Self {
            version,
            records: records.into(),
            upstreams: upstreams.to_vec().into(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn upstreams(&self) -> &[String] {
        &self.upstreams
    }

    /// True when any record name covers `qname`, regardless of type.
    pub fn is_configured(&self, qname: &str) -> bool {
        self.records.iter().any(|r| matches(qname, &r.name))
    }

    /// Two-pass lookup: exact names first for every type, then wildcard
    /// names for address types only. The second pass runs only when the
    /// first found nothing.
    pub fn find_record(&self, qname: &str, qtype: RecordType) -> Option<&Record> {
        let exact = self
            .records
            .iter()
            .find(|r| r.record_type == qtype && same_name(&r.name, qname));

        if exact.is_some() {
            return exact;
        }

        if !qtype.answers_wildcard() {
            return None;
        }

        self.records.iter().find(|r| {
            r.record_type == qtype && r.is_wildcard() && matches(qname, &r.name)
        })
    }
}
