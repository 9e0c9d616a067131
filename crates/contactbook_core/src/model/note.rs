//! Per-contact note model.
//!
//! # Invariants
//! - `content` is non-empty after trimming.
//! - Ids are strictly increasing within one contact's list.
//! - Notes are never mutated after creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Note id, minted from epoch milliseconds.
pub type NoteId = i64;

/// One free-text note attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Builds a note after validating its content.
    pub fn try_new(id: NoteId, content: impl Into<String>) -> Result<Self, NoteValidationError> {
        let content = content.into();
        validate_content(&content)?;
        Ok(Self { id, content })
    }
}

pub fn validate_content(content: &str) -> Result<(), NoteValidationError> {
    if content.trim().is_empty() {
        return Err(NoteValidationError::EmptyContent);
    }
    Ok(())
}

/// Mints the next note id for a list.
///
/// Uses `now_ms` unless the list already holds an id at or past it, in which
/// case the id is bumped to stay strictly increasing. Returns `None` when the
/// list already holds `NoteId::MAX`.
pub fn mint_note_id(existing: &[Note], now_ms: i64) -> Option<NoteId> {
    match existing.iter().map(|note| note.id).max() {
        Some(last) if last >= now_ms => last.checked_add(1),
        _ => Some(now_ms),
    }
}

/// Current wall clock in epoch milliseconds.
pub fn current_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::{mint_note_id, Note, NoteValidationError};

    #[test]
    fn whitespace_content_is_rejected() {
        assert_eq!(
            Note::try_new(1, " \n\t").unwrap_err(),
            NoteValidationError::EmptyContent
        );
    }

    #[test]
    fn mint_uses_clock_when_ahead_of_list() {
        let notes = vec![Note::try_new(100, "a").unwrap()];
        assert_eq!(mint_note_id(&notes, 250), Some(250));
        assert_eq!(mint_note_id(&[], 7), Some(7));
    }

    #[test]
    fn mint_bumps_past_existing_ids_when_clock_stalls() {
        let notes = vec![
            Note::try_new(500, "a").unwrap(),
            Note::try_new(501, "b").unwrap(),
        ];
        assert_eq!(mint_note_id(&notes, 500), Some(502));
    }

    #[test]
    fn mint_refuses_to_wrap_past_max_id() {
        let notes = vec![Note::try_new(i64::MAX, "last").unwrap()];
        assert_eq!(mint_note_id(&notes, 1_000), None);
    }

    #[test]
    fn serialized_shape_matches_stored_payload() {
        let note = Note::try_new(1700000000000, "call back").unwrap();
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, r#"{"id":1700000000000,"content":"call back"}"#);
    }
}
