//! Core logic for the contact book app.
//! Local favorites/notes/image persistence and the list/detail reconciliation
//! built on top of it.

pub mod config;
pub mod db;
pub mod format;
pub mod kv;
pub mod logging;
pub mod model;
pub mod provider;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{ConfigError, CoreConfig};
pub use format::phone::format_phone_number;
pub use kv::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageKey,
    StorageResult,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{
    Contact, ContactField, ContactId, ContactKind, ContactValidationError, EmailAddress,
    NewContact, PhoneNumber, PostalAddress,
};
pub use model::favorites::FavoriteSet;
pub use model::note::{Note, NoteId, NoteValidationError};
pub use provider::directory::{ContactDirectory, DirectoryError, InMemoryContactDirectory};
pub use provider::media::{ImageConstraints, MediaError, MediaPicker, ScriptedMediaPicker};
pub use provider::PermissionStatus;
pub use repo::favorites_repo::FavoritesRegistry;
pub use repo::image_repo::ImageStore;
pub use repo::note_repo::NoteStore;
pub use repo::{RepoError, RepoResult};
pub use service::contact_book::{ContactBook, ContactBookError, PermissionResource};
pub use view::detail_state::{ContactDetailState, LoadTicket};
pub use view::list_state::ContactListState;
pub use view::mutation::MutationState;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
