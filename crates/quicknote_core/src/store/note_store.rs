//! Note store: the owned note sequence and its persisted mirror.
//!
//! # Responsibility
//! - Own the ordered note sequence for a session.
//! - Mirror every mutation to one storage key as a JSON array.
//!
//! # Invariants
//! - Sequence order is insertion order, newest first.
//! - The stored array always equals the in-memory sequence: the next
//!   sequence is written before it replaces the current one.
//! - Edit and delete with an unknown id leave the sequence unchanged.
//! - Logs carry ids and counts only, never note content.

use crate::config::DEFAULT_STORAGE_KEY;
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::search::filter::{filter_notes, FilteredNotes};
use crate::storage::{LocalStorage, StorageError};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Note store error.
#[derive(Debug)]
pub enum StoreError {
    /// Storage backend failure.
    Storage(StorageError),
    /// Persisted value under `key` is not a valid note array.
    Parse {
        key: String,
        source: serde_json::Error,
    },
    /// Note sequence could not be encoded.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Parse { key, source } => {
                write!(f, "persisted notes under `{key}` are malformed: {source}")
            }
            Self::Serialize(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Owned note sequence backed by a `LocalStorage` key.
pub struct NoteStore<S: LocalStorage> {
    storage: S,
    key: String,
    notes: Vec<Note>,
}

impl<S: LocalStorage> NoteStore<S> {
    /// Loads the store from the default `notes` key.
    pub fn load(storage: S) -> StoreResult<Self> {
        Self::load_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Loads the store from `key`.
    ///
    /// An absent key yields an empty store.
    ///
    /// # Errors
    /// - `StoreError::Parse` when the stored value is not a note array.
    /// - `StoreError::Storage` when the backend read fails.
    pub fn load_with_key(storage: S, key: impl Into<String>) -> StoreResult<Self> {
        let key = key.into();
        let notes = match storage.get_item(&key)? {
            Some(raw) => serde_json::from_str::<Vec<Note>>(&raw).map_err(|source| {
                error!(
                    "event=notes_load module=store status=error key={} error_code=parse_failed line={} column={}",
                    key,
                    source.line(),
                    source.column()
                );
                StoreError::Parse {
                    key: key.clone(),
                    source,
                }
            })?,
            None => Vec::new(),
        };

        info!(
            "event=notes_load module=store status=ok key={} total={}",
            key,
            notes.len()
        );
        Ok(Self {
            storage,
            key,
            notes,
        })
    }

    /// Current sequence, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Filters the current sequence; see [`filter_notes`].
    pub fn search(&self, query: &str) -> FilteredNotes<'_> {
        filter_notes(&self.notes, query)
    }

    /// Creates a note at the front of the sequence and persists.
    pub fn create(&mut self, draft: NoteDraft) -> StoreResult<&Note> {
        let note = Note::new(draft);
        let id = note.id;
        let kind = note.kind;

        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.push(note);
        next.extend(self.notes.iter().cloned());
        self.commit(next)?;

        info!(
            "event=note_create module=store status=ok note_id={} kind={} total={}",
            id,
            kind,
            self.notes.len()
        );
        Ok(&self.notes[0])
    }

    /// Replaces the mutable fields of note `id` and persists.
    ///
    /// Optional fields absent from `draft` are cleared. Returns `false` when
    /// no note matched; the sequence is then left as is but still persisted.
    pub fn edit(&mut self, id: NoteId, draft: NoteDraft) -> StoreResult<bool> {
        let mut next = self.notes.clone();
        let matched = match next.iter_mut().find(|note| note.id == id) {
            Some(note) => {
                note.apply(draft);
                true
            }
            None => false,
        };
        self.commit(next)?;

        if matched {
            info!("event=note_edit module=store status=ok note_id={id}");
        } else {
            debug!("event=note_edit module=store status=noop note_id={id}");
        }
        Ok(matched)
    }

    /// Removes note `id` and persists. Returns `false` when no note matched.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<bool> {
        let next = self
            .notes
            .iter()
            .filter(|note| note.id != id)
            .cloned()
            .collect::<Vec<_>>();
        let matched = next.len() != self.notes.len();
        self.commit(next)?;

        if matched {
            info!(
                "event=note_delete module=store status=ok note_id={id} total={}",
                self.notes.len()
            );
        } else {
            debug!("event=note_delete module=store status=noop note_id={id}");
        }
        Ok(matched)
    }

    fn commit(&mut self, next: Vec<Note>) -> StoreResult<()> {
        let encoded = serde_json::to_string(&next).map_err(StoreError::Serialize)?;
        if let Err(err) = self.storage.set_item(&self.key, &encoded) {
            error!(
                "event=notes_persist module=store status=error key={} error={}",
                self.key, err
            );
            return Err(err.into());
        }
        self.notes = next;
        Ok(())
    }
}
