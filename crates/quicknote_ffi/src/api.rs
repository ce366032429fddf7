//! FFI use-case API for the Flutter note editor.
//!
//! # Responsibility
//! - Expose list/search/create/edit/delete as sync FRB functions.
//! - Translate core results into simple envelopes the UI can render.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Edit/delete with an unknown id report success and change nothing.
//! - Every call loads the store, applies one action and persists it while
//!   holding `STORE_LOCK`.

use log::debug;
use quicknote_core::db::open_db;
use quicknote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CoreConfig, Note, NoteDraft, NoteId, NoteKind, NoteStore, SqliteStorage, StoreResult,
};
use std::sync::{Mutex, OnceLock};

static CORE_CONFIG: OnceLock<CoreConfig> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive), or
///   blank to use the configured level.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(resolve_log_level(&level), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One note card as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    /// RFC 3339 creation time with millisecond precision.
    pub date: String,
    pub content: String,
    /// `text` or `voice`.
    pub type_note: String,
    pub priority: Option<String>,
    pub image_url: Option<String>,
}

impl From<&Note> for NoteItem {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.to_string(),
            date: note.date_rfc3339(),
            content: note.content.clone(),
            type_note: note.kind.as_str().to_string(),
            priority: note.priority.clone(),
            image_url: note.image_url.clone(),
        }
    }
}

/// List/search response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    /// Visible notes, newest first.
    pub items: Vec<NoteItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Mutation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Target or created note id.
    pub note_id: Option<String>,
    /// Notification text for the UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: String) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Lists every note, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    notes_search(String::new())
}

/// Lists notes whose content contains `query`, ignoring case.
///
/// An empty query lists everything. The query is not trimmed.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_search(query: String) -> NotesListResponse {
    let result = with_note_store(|store| {
        Ok(store
            .search(query.as_str())
            .iter()
            .map(NoteItem::from)
            .collect::<Vec<_>>())
    });

    match result {
        Ok(items) => {
            let message = if items.is_empty() {
                "No notes.".to_string()
            } else {
                format!("Found {} note(s).", items.len())
            };
            NotesListResponse { items, message }
        }
        Err(err) => NotesListResponse {
            items: Vec::new(),
            message: format!("notes_search failed: {err}"),
        },
    }
}

/// Creates a note at the top of the list.
///
/// Blank `priority`/`image_url` values are stored as absent.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(
    content: String,
    type_note: String,
    priority: Option<String>,
    image_url: Option<String>,
) -> NoteActionResponse {
    let draft = match build_draft(content, &type_note, priority, image_url) {
        Ok(draft) => draft,
        Err(err) => return NoteActionResponse::failure(format!("note_create failed: {err}")),
    };

    match with_note_store(|store| store.create(draft).map(|note| note.id)) {
        Ok(note_id) => NoteActionResponse::success("Note created.", note_id.to_string()),
        Err(err) => NoteActionResponse::failure(format!("note_create failed: {err}")),
    }
}

/// Replaces content, type, priority and image of note `id`.
///
/// Omitted optional fields clear the stored values.
#[flutter_rust_bridge::frb(sync)]
pub fn note_edit(
    id: String,
    content: String,
    type_note: String,
    priority: Option<String>,
    image_url: Option<String>,
) -> NoteActionResponse {
    let draft = match build_draft(content, &type_note, priority, image_url) {
        Ok(draft) => draft,
        Err(err) => return NoteActionResponse::failure(format!("note_edit failed: {err}")),
    };

    let Some(note_id) = parse_note_id(&id) else {
        return NoteActionResponse::success("Note edited!", id);
    };
    match with_note_store(|store| store.edit(note_id, draft)) {
        Ok(_) => NoteActionResponse::success("Note edited!", id),
        Err(err) => NoteActionResponse::failure(format!("note_edit failed: {err}")),
    }
}

/// Deletes note `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: String) -> NoteActionResponse {
    let Some(note_id) = parse_note_id(&id) else {
        return NoteActionResponse::success("Note deleted!", id);
    };
    match with_note_store(|store| store.delete(note_id)) {
        Ok(_) => NoteActionResponse::success("Note deleted!", id),
        Err(err) => NoteActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

fn build_draft(
    content: String,
    type_note: &str,
    priority: Option<String>,
    image_url: Option<String>,
) -> Result<NoteDraft, String> {
    let kind = type_note.parse::<NoteKind>().map_err(|err| err.to_string())?;
    Ok(NoteDraft {
        content,
        kind,
        priority: non_blank(priority),
        image_url: non_blank(image_url),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

// Ids the store never issued cannot match; treat them like unknown ids.
fn parse_note_id(raw: &str) -> Option<NoteId> {
    match NoteId::parse_str(raw.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            debug!("event=ffi_note_id module=ffi status=noop reason=unparseable_id");
            None
        }
    }
}

fn core_config() -> &'static CoreConfig {
    CORE_CONFIG.get_or_init(CoreConfig::from_env)
}

// A blank level defers to `QUICKNOTE_LOG_LEVEL` or the build default.
fn resolve_log_level(level: &str) -> &str {
    if level.trim().is_empty() {
        core_config().log_level
    } else {
        level
    }
}

fn with_note_store<T>(
    f: impl FnOnce(&mut NoteStore<SqliteStorage<'_>>) -> StoreResult<T>,
) -> Result<T, String> {
    let _guard = STORE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let config = core_config();
    let conn = open_db(&config.db_path).map_err(|err| format!("note DB open failed: {err}"))?;
    let storage =
        SqliteStorage::try_new(&conn).map_err(|err| format!("note storage init failed: {err}"))?;
    let mut store = NoteStore::load_with_key(storage, config.storage_key.as_str())
        .map_err(|err| format!("note store load failed: {err}"))?;
    f(&mut store).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, note_create, note_delete, note_edit, notes_list,
        notes_search, ping, resolve_log_level, CORE_CONFIG,
    };
    use quicknote_core::CoreConfig;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn use_test_db() {
        CORE_CONFIG.get_or_init(|| CoreConfig {
            db_path: std::env::temp_dir().join(format!(
                "quicknote-ffi-{}-{}.sqlite3",
                std::process::id(),
                unique_token("db")
            )),
            ..CoreConfig::default()
        });
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn blank_logging_level_uses_configured_level() {
        use_test_db();
        let configured = super::core_config().log_level;
        assert_eq!(resolve_log_level("  "), configured);
        assert_eq!(resolve_log_level("warn"), "warn");

        let error = init_logging(String::new(), "tmp/logs".to_string());
        assert!(error.contains("absolute"), "{error}");
    }

    #[test]
    fn create_search_edit_delete_flow() {
        use_test_db();
        let token = unique_token("flow");

        let created = note_create(
            format!("Buy milk {token}"),
            "text".to_string(),
            Some("high".to_string()),
            Some("  ".to_string()),
        );
        assert!(created.ok, "{}", created.message);
        let note_id = created.note_id.expect("create should return note_id");

        let found = notes_search(token.to_uppercase());
        assert_eq!(found.items.len(), 1, "{}", found.message);
        let item = &found.items[0];
        assert_eq!(item.id, note_id);
        assert_eq!(item.type_note, "text");
        assert_eq!(item.priority.as_deref(), Some("high"));
        assert_eq!(item.image_url, None);
        assert!(item.date.ends_with('Z'));

        let edited = note_edit(
            note_id.clone(),
            format!("Buy oat milk {token}"),
            "voice".to_string(),
            None,
            Some("cart.png".to_string()),
        );
        assert!(edited.ok, "{}", edited.message);
        assert_eq!(edited.message, "Note edited!");

        let after_edit = notes_search(token.clone());
        let item = &after_edit.items[0];
        assert!(item.content.starts_with("Buy oat milk"));
        assert_eq!(item.type_note, "voice");
        assert_eq!(item.priority, None);
        assert_eq!(item.image_url.as_deref(), Some("cart.png"));

        let deleted = note_delete(note_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert_eq!(deleted.message, "Note deleted!");
        assert!(notes_search(token).items.is_empty());
        assert!(notes_list().items.iter().all(|item| item.id != note_id));
    }

    #[test]
    fn unknown_or_malformed_ids_are_silent_noops() {
        use_test_db();
        let deleted = note_delete("not-a-uuid".to_string());
        assert!(deleted.ok);
        let edited = note_edit(
            "6f2c0c59-3c1e-4b55-9d7e-2b1f0f7a8c11".to_string(),
            "ghost".to_string(),
            "text".to_string(),
            None,
            None,
        );
        assert!(edited.ok);

        assert!(notes_search("ghost".to_string())
            .items
            .iter()
            .all(|item| item.id != "6f2c0c59-3c1e-4b55-9d7e-2b1f0f7a8c11"));
    }

    #[test]
    fn unsupported_note_type_is_rejected() {
        use_test_db();
        let response = note_create("x".to_string(), "video".to_string(), None, None);
        assert!(!response.ok);
        assert!(response.note_id.is_none());
        assert!(response.message.contains("unsupported note type"));
    }
}
