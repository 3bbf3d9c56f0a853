use serde::{Deserialize, Serialize};

use crate::dns_record::Record;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// A management grouping of records. Resolution does not scope lookups by
/// domain membership; every record of every domain is searched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,

    #[serde(default)]
    pub records: Vec<Record>,
}

impl Domain {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn validate_name(name: &str) -> Result<(), String> {
        if name.trim().is_empty() {
            return Err("Domain name cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn info(&self) -> DomainInfo {
        DomainInfo {
            name: self.name.clone(),
            record_count: self.records.len(),
        }
    }

    pub fn has_record_key(&self, record: &Record) -> bool {
        self.records.iter().any(|r| r.same_key(record))
    }

    pub fn position_of(&self, record_name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == record_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainInfo {
    pub name: String,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainPage {
    pub total: u64,
    pub domains: Vec<DomainInfo>,
}

/// Normalised pagination parameters: `page >= 1`, `page_size` in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = if page < 1 { 1 } else { page as usize };
        let page_size = if (1..=MAX_PAGE_SIZE as i64).contains(&page_size) {
            page_size as usize
        } else {
            DEFAULT_PAGE_SIZE
        };
        Self { page, page_size }
    }

    /// Builds a request from raw query-string values; anything missing or
    /// unparsable falls back to the defaults.
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = page.and_then(|p| p.trim().parse::<i64>().ok()).unwrap_or(1);
        let page_size = page_size
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE as i64);
        Self::new(page, page_size)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Half-open slice bounds for a collection of `total` items, or `None`
    /// when the page starts past the end.
    pub fn bounds(&self, total: usize) -> Option<(usize, usize)> {
        let start = (self.page - 1).saturating_mul(self.page_size);
        if start >= total {
            return None;
        }
        let end = start.saturating_add(self.page_size).min(total);
        Some((start, end))
    }
}
