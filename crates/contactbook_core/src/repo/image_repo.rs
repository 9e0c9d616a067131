//! Per-contact custom image reference.
//!
//! One URI per contact under `image:<id>`, overwritten on every update.

use super::RepoResult;
use crate::kv::{KeyValueStore, StorageKey};
use log::{info, warn};

/// Image reference store over a key-value store.
pub struct ImageStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ImageStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the cached image URI, if one was stored and is readable.
    pub fn get_image_reference(&self, contact_id: &str) -> Option<String> {
        match self.store.get(&StorageKey::Image(contact_id).to_key()) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=image_get module=images status=degraded contact_id={contact_id} error_code=storage_read_failed error={err}"
                );
                None
            }
        }
    }

    /// Overwrites the cached image URI.
    pub fn set_image_reference(&self, contact_id: &str, uri: &str) -> RepoResult<()> {
        self.store.set(&StorageKey::Image(contact_id).to_key(), uri)?;
        info!("event=image_set module=images status=ok contact_id={contact_id}");
        Ok(())
    }
}
