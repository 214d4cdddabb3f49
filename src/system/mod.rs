//! # System records tracked by the persistence collaborator.
//!
//! The hub's main consumer is a local persistence/sync layer that publishes
//! state-change events on well-known channels. That layer keeps a small set
//! of internal record types alongside user data to make cloud sync work at
//! all; this module is the catalog of those types. The persistence engine
//! itself lives outside this crate — only the list of record kinds it must
//! track is defined here.

mod records;

pub use records::{SystemRecordKind, SystemRecords};
