//! Local stores layered on the key-value contract.
//!
//! # Responsibility
//! - Persist favorites, per-contact notes and per-contact image references.
//! - Keep serialization and key layout out of view/service code.
//!
//! # Invariants
//! - Absent or corrupt payloads read as the empty default.
//! - Plain reads degrade to the default on storage failure; read-modify-write
//!   paths abort instead so a failed read never overwrites stored data.
//! - Validation runs before any write.

use crate::kv::{KeyValueStore, StorageError, StorageKey};
use crate::model::note::NoteValidationError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod favorites_repo;
pub mod image_repo;
pub mod note_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by local store mutations.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    Validation(NoteValidationError),
    Encode(serde_json::Error),
    /// Stored notes already use the largest representable id.
    NoteIdExhausted(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode stored payload: {err}"),
            Self::NoteIdExhausted(contact_id) => {
                write!(f, "no note id left after the stored maximum for contact {contact_id}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NoteIdExhausted(_) => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Reads and decodes one key for display; every failure degrades to default.
fn read_or_default<S, T>(store: &S, key: StorageKey<'_>) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match read_for_update(store, key) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=kv_read module=repo status=degraded namespace={} error_code=storage_read_failed error={}",
                key.namespace(),
                err
            );
            T::default()
        }
    }
}

/// Reads and decodes one key ahead of a write.
///
/// Missing or corrupt payloads decode to default; backend failures propagate.
fn read_for_update<S, T>(store: &S, key: StorageKey<'_>) -> Result<T, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(&key.to_key())? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(
                "event=kv_decode module=repo status=degraded namespace={} error_code=corrupt_payload bytes={} error={}",
                key.namespace(),
                raw.len(),
                err
            );
            Ok(T::default())
        }
    }
}

fn write_json<S, T>(store: &S, key: StorageKey<'_>, value: &T) -> RepoResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value).map_err(RepoError::Encode)?;
    store.set(&key.to_key(), &encoded)?;
    Ok(())
}
