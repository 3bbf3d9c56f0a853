mod toml_record_document;

pub use toml_record_document::TomlRecordDocument;
