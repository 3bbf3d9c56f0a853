mod record_document;
mod zone_snapshot_source;

pub use record_document::RecordDocument;
pub use zone_snapshot_source::ZoneSnapshotSource;
