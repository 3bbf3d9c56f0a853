use async_trait::async_trait;
use dnsm_application::ports::RecordDocument;
use dnsm_domain::{Config, Domain, DomainError, Record};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

const DOMAINS_KEY: &str = "domains";

/// The record set stored in the `domains` array-of-tables of the main TOML
/// configuration file.
///
/// Writes only touch `domains`. The rest of the file (comments, ordering,
/// sections this process does not model) is carried over as it was.
pub struct TomlRecordDocument {
    path: PathBuf,
    fallback: Config,
    last_parsed: Mutex<Option<toml::Table>>,
}

impl TomlRecordDocument {
    /// `fallback` is served by `read` while the file does not exist, and is
    /// the base document when the file has to be created.
    pub fn new(path: impl Into<PathBuf>, fallback: Config) -> Self {
        Self {
            path: path.into(),
            fallback,
            last_parsed: Mutex::new(None),
        }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn read_document(&self) -> Result<Config, DomainError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.display_path(), "Record document missing, using defaults");
                return Ok(self.fallback.clone());
            }
            Err(e) => {
                return Err(DomainError::Load(format!(
                    "{}: {}",
                    self.display_path(),
                    e
                )))
            }
        };

        let raw: toml::Table = toml::from_str(&contents)
            .map_err(|e| DomainError::Load(format!("{}: {}", self.display_path(), e)))?;
        let config = Config::parse(&contents)
            .map_err(|e| DomainError::Load(format!("{}: {}", self.display_path(), e)))?;

        self.remember(raw);
        Ok(config)
    }

    fn remember(&self, raw: toml::Table) {
        if let Ok(mut last) = self.last_parsed.lock() {
            *last = Some(raw);
        }
    }

    /// Last successfully parsed document, or the fallback configuration when
    /// nothing was parsed yet.
    fn base_table(&self) -> Result<toml::Table, String> {
        if let Ok(last) = self.last_parsed.lock() {
            if let Some(table) = last.as_ref() {
                return Ok(table.clone());
            }
        }

        match toml::Value::try_from(&self.fallback) {
            Ok(toml::Value::Table(table)) => Ok(table),
            Ok(_) => Err("configuration did not serialize to a table".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }

    fn write_document(&self, domains: &[Domain]) -> Result<(), DomainError> {
        let mut failures = Vec::with_capacity(3);

        match self.rewrite_in_place(domains) {
            Ok(()) => return self.finish("rewrite"),
            Err(e) => failures.push(format!("rewrite: {}", e)),
        }

        match self.create_if_absent(domains) {
            Ok(()) => return self.finish("create"),
            Err(e) => failures.push(format!("create: {}", e)),
        }

        match self.write_raw(domains) {
            Ok(()) => {
                warn!(
                    path = %self.display_path(),
                    "Record document rewritten without formatting, comments were dropped"
                );
                self.finish("raw")
            }
            Err(e) => {
                failures.push(format!("raw: {}", e));
                Err(DomainError::Persistence(format!(
                    "{}: {}",
                    self.display_path(),
                    failures.join("; ")
                )))
            }
        }
    }

    /// Replaces `domains` in the existing file and swaps the result in with a
    /// rename.
    fn rewrite_in_place(&self, domains: &[Domain]) -> Result<(), String> {
        let existing = std::fs::read_to_string(&self.path).map_err(|e| e.to_string())?;
        let mut doc = existing
            .parse::<toml_edit::DocumentMut>()
            .map_err(|e| format!("failed to parse document: {}", e))?;

        set_domains(doc.as_table_mut(), domains);

        let tmp = self.temp_path();
        let written = write_synced(&tmp, doc.to_string().as_bytes(), false)
            .and_then(|_| std::fs::rename(&tmp, &self.path));

        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.to_string());
        }
        Ok(())
    }

    /// Creates the file from the last known document. Never replaces a file
    /// that already exists.
    fn create_if_absent(&self, domains: &[Domain]) -> Result<(), String> {
        let base = toml::to_string(&self.base_table()?).map_err(|e| e.to_string())?;
        let mut doc = base
            .parse::<toml_edit::DocumentMut>()
            .map_err(|e| e.to_string())?;

        set_domains(doc.as_table_mut(), domains);

        write_synced(&self.path, doc.to_string().as_bytes(), true).map_err(|e| e.to_string())
    }

    /// Serializes the last parsed document as a plain table with `domains`
    /// replaced.
    fn write_raw(&self, domains: &[Domain]) -> Result<(), String> {
        let mut table = self.base_table()?;
        table.remove(DOMAINS_KEY);
        if !domains.is_empty() {
            let value = toml::Value::try_from(domains).map_err(|e| e.to_string())?;
            table.insert(DOMAINS_KEY.to_string(), value);
        }
        let rendered = toml::to_string(&table).map_err(|e| e.to_string())?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        std::fs::write(&self.path, rendered).map_err(|e| e.to_string())
    }

    fn finish(&self, strategy: &str) -> Result<(), DomainError> {
        debug!(path = %self.display_path(), strategy, "Record document written");

        let refreshed = std::fs::read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|contents| toml::from_str::<toml::Table>(&contents).map_err(|e| e.to_string()));

        match refreshed {
            Ok(raw) => self.remember(raw),
            Err(e) => warn!(
                path = %self.display_path(),
                error = %e,
                "Record document written but could not be re-read"
            ),
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dnsm.toml".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

#[async_trait]
impl RecordDocument for TomlRecordDocument {
    async fn read(&self) -> Result<Config, DomainError> {
        let config = self.read_document()?;
        info!(
            path = %self.display_path(),
            domains = config.domains.len(),
            "Record document read"
        );
        Ok(config)
    }

    async fn write_domains(&self, domains: &[Domain]) -> Result<(), DomainError> {
        self.write_document(domains)
    }
}

fn write_synced(path: &Path, bytes: &[u8], create_new: bool) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if create_new {
        options.create_new(true);
    } else {
        options.create(true).truncate(true);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn set_domains(root: &mut toml_edit::Table, domains: &[Domain]) {
    root.remove(DOMAINS_KEY);
    if domains.is_empty() {
        return;
    }

    let mut aot = toml_edit::ArrayOfTables::new();
    for domain in domains {
        let mut table = toml_edit::Table::new();
        table.insert("name", toml_edit::value(domain.name.clone()));

        if !domain.records.is_empty() {
            let mut records = toml_edit::ArrayOfTables::new();
            for record in &domain.records {
                records.push(record_table(record));
            }
            table.insert("records", toml_edit::Item::ArrayOfTables(records));
        }
        aot.push(table);
    }
    root.insert(DOMAINS_KEY, toml_edit::Item::ArrayOfTables(aot));
}

fn record_table(record: &Record) -> toml_edit::Table {
    let mut table = toml_edit::Table::new();
    table.insert("name", toml_edit::value(record.name.clone()));
    table.insert("type", toml_edit::value(record.record_type.as_str()));
    table.insert("value", toml_edit::value(record.value.clone()));
    table.insert("ttl", toml_edit::value(record.ttl as i64));
    table
}
