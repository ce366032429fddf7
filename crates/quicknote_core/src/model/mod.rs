//! Domain model for notes.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the JSON wire shape shared with persisted storage.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion removes the record; there are no tombstones.

pub mod note;
