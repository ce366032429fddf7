//! Note search entry points.
//!
//! # Responsibility
//! - Derive the visible subset of notes for a free-text query.
//! - Keep matching rules inside core so every surface filters the same way.

pub mod filter;
