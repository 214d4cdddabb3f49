//! Catalog of the internal record types a local store tracks for cloud sync.

use std::fmt;

// CHANGE this version whenever any system record kind is added/removed/updated.
const SYSTEM_RECORDS_VERSION: &str = "7c2e6a40-91d3-4b8a-b5f2-0d84c3a9e617";

/// Internal record types the persistence layer keeps alongside user data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemRecordKind {
    /// Last time each record type was successfully synced with the cloud.
    /// For example, "Post" records were last synced at some instant.
    SyncCheckpoint,

    /// Version of the local data schema; that is, which record types exist
    /// and what their shape is. Structural changes bump this version.
    SchemaVersion,

    /// Sync state of individual records: per-record version, deletion
    /// status, last-change time. Unlike [`SystemRecordKind::SchemaVersion`],
    /// which deals with the structure of data, this deals with actual
    /// records and their states.
    RecordMetadata,

    /// Local changes staged for upload to the cloud (the outbox).
    PendingMutation,
}

impl SystemRecordKind {
    /// Returns a short stable name (snake_case) for use in logs/metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemRecordKind::SyncCheckpoint => "sync_checkpoint",
            SystemRecordKind::SchemaVersion => "schema_version",
            SystemRecordKind::RecordMetadata => "record_metadata",
            SystemRecordKind::PendingMutation => "pending_mutation",
        }
    }
}

impl fmt::Display for SystemRecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The versioned set of system record kinds.
///
/// Handed to the persistence collaborator at bootstrap so it can provision
/// storage for every kind the sync engine depends on.
#[derive(Clone, Copy, Debug)]
pub struct SystemRecords {
    version: &'static str,
    kinds: &'static [SystemRecordKind],
}

impl SystemRecords {
    /// Creates the catalog of system record kinds.
    pub fn provider() -> Self {
        Self {
            version: SYSTEM_RECORDS_VERSION,
            kinds: &[
                SystemRecordKind::SyncCheckpoint,
                SystemRecordKind::SchemaVersion,
                SystemRecordKind::RecordMetadata,
                SystemRecordKind::PendingMutation,
            ],
        }
    }

    /// Version tag of the catalog; changes whenever the set of kinds does.
    pub fn version(&self) -> &'static str {
        self.version
    }

    /// The record kinds, in provisioning order.
    pub fn kinds(&self) -> &'static [SystemRecordKind] {
        self.kinds
    }
}
