//! Note lifecycle use-cases.
//!
//! # Responsibility
//! - Orchestrate create/edit/delete/load over a `LocalStorage` backend.
//! - Keep callers decoupled from the persisted JSON layout.

pub mod note_store;
