use super::RecordType;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RECORD_TTL: u32 = 300;

/// A locally served resource record.
///
/// `name` is either a concrete owner name or a wildcard of the form
/// `*.<suffix>`. The meaning of `value` depends on `record_type`: an IPv4
/// literal, an IPv6 literal, a target name or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,

    #[serde(rename = "type")]
    pub record_type: RecordType,

    pub value: String,

    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

fn default_ttl() -> u32 {
    DEFAULT_RECORD_TTL
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            value: value.into(),
            ttl,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.name.starts_with('*')
    }

    /// Same `(name, type)` key; the uniqueness rule within a domain.
    pub fn same_key(&self, other: &Record) -> bool {
        self.name == other.name && self.record_type == other.record_type
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Record name cannot be empty".to_string());
        }
        if self.value.trim().is_empty() {
            return Err("Record value cannot be empty".to_string());
        }
        Ok(())
    }
}
