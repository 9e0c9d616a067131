//! Key-value persistence contract.
//!
//! # Responsibility
//! - Define the string-keyed `get`/`set` store that every local store uses.
//! - Own the key layout for favorites, notes and image references.
//!
//! # Invariants
//! - A missing key is `Ok(None)`, never an error.
//! - Notes and image keys carry distinct prefixes so the same contact id never
//!   addresses both namespaces.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

/// Fixed key holding the serialized favorites list.
pub const FAVORITES_KEY: &str = "favoriteContacts";
const NOTES_KEY_PREFIX: &str = "notes:";
const IMAGE_KEY_PREFIX: &str = "image:";

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence failure reported by a key-value backend.
#[derive(Debug)]
pub enum StorageError {
    /// Backend cannot serve the request (storage unavailable, quota, ...).
    Unavailable(String),
    /// SQLite backend failure.
    Db(DbError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(details) => write!(f, "storage unavailable: {details}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed durable store.
pub trait KeyValueStore {
    /// Reads one value; `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes one value, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// Logical key addressed by one of the local stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey<'a> {
    Favorites,
    Notes(&'a str),
    Image(&'a str),
}

impl StorageKey<'_> {
    /// Returns the physical key string written to the backend.
    pub fn to_key(self) -> String {
        match self {
            Self::Favorites => FAVORITES_KEY.to_string(),
            Self::Notes(contact_id) => format!("{NOTES_KEY_PREFIX}{contact_id}"),
            Self::Image(contact_id) => format!("{IMAGE_KEY_PREFIX}{contact_id}"),
        }
    }

    /// Short namespace label used in log events.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::Notes(_) => "notes",
            Self::Image(_) => "image",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StorageKey, FAVORITES_KEY};

    #[test]
    fn notes_and_image_keys_never_collide_for_same_contact() {
        let notes = StorageKey::Notes("42").to_key();
        let image = StorageKey::Image("42").to_key();
        assert_eq!(notes, "notes:42");
        assert_eq!(image, "image:42");
        assert_ne!(notes, image);
    }

    #[test]
    fn favorites_key_is_constant() {
        assert_eq!(StorageKey::Favorites.to_key(), FAVORITES_KEY);
    }
}
