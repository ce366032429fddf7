//! Core domain logic for QuickNote.
//! This crate is the single source of truth for note lifecycle invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod search;
pub mod storage;
pub mod store;

pub use config::{CoreConfig, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteDraft, NoteId, NoteKind, UnknownNoteKind};
pub use search::filter::{filter_notes, FilteredNotes};
pub use storage::{LocalStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};
pub use store::note_store::{NoteStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
