//! Per-contact note lists.
//!
//! # Responsibility
//! - Persist each contact's notes as one ordered list under `notes:<id>`.
//!
//! # Invariants
//! - Insertion order is preserved.
//! - Empty or whitespace-only content is rejected before any read or write.
//! - Deleting an unknown id performs no write.

use super::{read_for_update, read_or_default, write_json, RepoError, RepoResult};
use crate::kv::{KeyValueStore, StorageKey};
use crate::model::note::{current_epoch_ms, mint_note_id, validate_content, Note, NoteId};
use log::{debug, info};

/// Notes store over a key-value store.
pub struct NoteStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists notes for one contact in insertion order.
    pub fn list_notes(&self, contact_id: &str) -> Vec<Note> {
        read_or_default(&self.store, StorageKey::Notes(contact_id))
    }

    /// Appends one note stamped with the current clock.
    pub fn add_note(&self, contact_id: &str, content: &str) -> RepoResult<Note> {
        self.add_note_at(contact_id, content, current_epoch_ms())
    }

    /// Appends one note using `now_ms` as the id clock source.
    pub fn add_note_at(&self, contact_id: &str, content: &str, now_ms: i64) -> RepoResult<Note> {
        validate_content(content)?;

        let key = StorageKey::Notes(contact_id);
        let mut notes: Vec<Note> = read_for_update(&self.store, key)?;
        let note_id = mint_note_id(&notes, now_ms)
            .ok_or_else(|| RepoError::NoteIdExhausted(contact_id.to_string()))?;
        let note = Note::try_new(note_id, content)?;
        notes.push(note.clone());
        write_json(&self.store, key, &notes)?;

        info!(
            "event=note_add module=notes status=ok contact_id={contact_id} note_id={} total={}",
            note.id,
            notes.len()
        );
        Ok(note)
    }

    /// Deletes one note by id; returns whether a note was removed.
    pub fn delete_note(&self, contact_id: &str, note_id: NoteId) -> RepoResult<bool> {
        let key = StorageKey::Notes(contact_id);
        let mut notes: Vec<Note> = read_for_update(&self.store, key)?;
        let before = notes.len();
        notes.retain(|note| note.id != note_id);
        if notes.len() == before {
            debug!(
                "event=note_delete module=notes status=noop contact_id={contact_id} note_id={note_id}"
            );
            return Ok(false);
        }

        write_json(&self.store, key, &notes)?;
        info!(
            "event=note_delete module=notes status=ok contact_id={contact_id} note_id={note_id} total={}",
            notes.len()
        );
        Ok(true)
    }
}
