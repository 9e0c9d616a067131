//! Favorites registry persisted under one fixed key.
//!
//! # Invariants
//! - The stored list never contains duplicates.
//! - `add`/`remove` are idempotent and skip the write when nothing changes.
//! - Concurrent toggles are last-writer-wins; callers serialize them.

use super::{read_for_update, read_or_default, write_json, RepoResult};
use crate::kv::{KeyValueStore, StorageKey};
use crate::model::favorites::FavoriteSet;
use log::{debug, info};

/// Favorites registry over a key-value store.
pub struct FavoritesRegistry<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> FavoritesRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns all favorites; empty when absent, corrupt or unreadable.
    pub fn list_favorites(&self) -> FavoriteSet {
        read_or_default(&self.store, StorageKey::Favorites)
    }

    pub fn is_favorite(&self, contact_id: &str) -> bool {
        self.list_favorites().contains(contact_id)
    }

    /// Adds one favorite. No-op when already present.
    pub fn add_favorite(&self, contact_id: &str) -> RepoResult<()> {
        let mut favorites: FavoriteSet = read_for_update(&self.store, StorageKey::Favorites)?;
        if !favorites.insert(contact_id) {
            debug!("event=favorite_add module=favorites status=noop contact_id={contact_id}");
            return Ok(());
        }
        write_json(&self.store, StorageKey::Favorites, &favorites)?;
        info!(
            "event=favorite_add module=favorites status=ok contact_id={contact_id} total={}",
            favorites.len()
        );
        Ok(())
    }

    /// Removes one favorite. No-op when absent.
    pub fn remove_favorite(&self, contact_id: &str) -> RepoResult<()> {
        let mut favorites: FavoriteSet = read_for_update(&self.store, StorageKey::Favorites)?;
        if !favorites.remove(contact_id) {
            debug!("event=favorite_remove module=favorites status=noop contact_id={contact_id}");
            return Ok(());
        }
        write_json(&self.store, StorageKey::Favorites, &favorites)?;
        info!(
            "event=favorite_remove module=favorites status=ok contact_id={contact_id} total={}",
            favorites.len()
        );
        Ok(())
    }

    /// Flips membership and returns the new membership.
    pub fn toggle_favorite(&self, contact_id: &str) -> RepoResult<bool> {
        let favorites: FavoriteSet = read_for_update(&self.store, StorageKey::Favorites)?;
        if favorites.contains(contact_id) {
            self.remove_favorite(contact_id)?;
            Ok(false)
        } else {
            self.add_favorite(contact_id)?;
            Ok(true)
        }
    }
}
