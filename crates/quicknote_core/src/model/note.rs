//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its JSON wire shape.
//! - Provide the draft type carrying caller-editable fields.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `date` is assigned once at creation and never changes.
//! - Every in-memory field is persisted verbatim; nothing is derived.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Source of a note's content.
///
/// Written as `text`/`voice`. Reading goes through `FromStr`, so labels are
/// trimmed and case-insensitive and `audio` maps to `Voice`. Any other label
/// is rejected; free-form type tags are not carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    /// Typed by the user.
    Text,
    /// Transcribed from speech.
    Voice,
}

impl<'de> Deserialize<'de> for NoteKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(de::Error::custom)
    }
}

impl NoteKind {
    /// Wire label used in the persisted `typeNote` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
        }
    }
}

impl Display for NoteKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a `typeNote` label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNoteKind(pub String);

impl Display for UnknownNoteKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported note type `{}`; expected text|voice", self.0)
    }
}

impl Error for UnknownNoteKind {}

impl FromStr for NoteKind {
    type Err = UnknownNoteKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "voice" | "audio" => Ok(Self::Voice),
            _ => Err(UnknownNoteKind(value.to_string())),
        }
    }
}

/// Persisted note record.
///
/// Serialized with camelCase keys so stored arrays stay readable by the
/// browser build that shares the same storage layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Creation time, millisecond precision.
    pub date: DateTime<Utc>,
    pub content: String,
    #[serde(rename = "typeNote")]
    pub kind: NoteKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Note {
    /// Creates a note from a draft with a fresh id and the current time.
    pub fn new(draft: NoteDraft) -> Self {
        Self::with_id(Uuid::new_v4(), now_millis(), draft)
    }

    /// Creates a note with caller-provided identity.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(id: NoteId, date: DateTime<Utc>, draft: NoteDraft) -> Self {
        Self {
            id,
            date,
            content: draft.content,
            kind: draft.kind,
            priority: draft.priority,
            image_url: draft.image_url,
        }
    }

    /// Creation time as RFC 3339 with milliseconds, e.g.
    /// `2024-03-01T12:30:00.000Z`.
    pub fn date_rfc3339(&self) -> String {
        self.date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Overwrites every mutable field with the draft.
    ///
    /// Absent optional fields in the draft clear the stored ones.
    pub fn apply(&mut self, draft: NoteDraft) {
        self.content = draft.content;
        self.kind = draft.kind;
        self.priority = draft.priority;
        self.image_url = draft.image_url;
    }
}

/// Caller-editable note fields used by create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub content: String,
    pub kind: NoteKind,
    pub priority: Option<String>,
    pub image_url: Option<String>,
}

impl NoteDraft {
    pub fn new(content: impl Into<String>, kind: NoteKind) -> Self {
        Self {
            content: content.into(),
            kind,
            priority: None,
            image_url: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(content, NoteKind::Text)
    }

    pub fn voice(content: impl Into<String>) -> Self {
        Self::new(content, NoteKind::Voice)
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

// JS `Date` keeps milliseconds only; truncating keeps serialize/parse lossless.
fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
