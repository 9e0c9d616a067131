//! Contact book use-case service.
//!
//! # Responsibility
//! - Wire directory, media picker and local stores into list/detail state.
//! - Enforce permission checks before touching device collaborators.
//!
//! # Invariants
//! - Permission denial aborts before any directory or picker call.
//! - Note validation failures abort before any storage access.
//! - Detail results are applied through load tickets, so a result for a
//!   contact that is no longer open is dropped.

use crate::kv::KeyValueStore;
use crate::model::contact::{ContactId, ContactValidationError, NewContact, DETAIL_FIELDS};
use crate::model::note::{Note, NoteId};
use crate::provider::directory::{ContactDirectory, DirectoryError};
use crate::provider::media::{image_file_name, ImageConstraints, MediaError, MediaPicker};
use crate::repo::favorites_repo::FavoritesRegistry;
use crate::repo::image_repo::ImageStore;
use crate::repo::note_repo::NoteStore;
use crate::repo::RepoError;
use crate::view::detail_state::{ContactDetailState, LoadTicket};
use crate::view::list_state::ContactListState;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Device capability guarded by a runtime permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionResource {
    Contacts,
    MediaLibrary,
}

impl PermissionResource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::MediaLibrary => "media_library",
        }
    }
}

/// Service error surfaced to the presentation layer.
#[derive(Debug)]
pub enum ContactBookError {
    PermissionDenied(PermissionResource),
    /// Operation needs an open contact.
    NoActiveContact,
    ContactNotFound(ContactId),
    InvalidContact(ContactValidationError),
    /// Picked URI does not name a file.
    InvalidImage(String),
    Repo(RepoError),
    Directory(DirectoryError),
    Media(MediaError),
}

impl Display for ContactBookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied(resource) => {
                write!(f, "permission denied: {}", resource.as_str())
            }
            Self::NoActiveContact => write!(f, "no contact is open"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidContact(err) => write!(f, "{err}"),
            Self::InvalidImage(uri) => write!(f, "picked image has no file name: `{uri}`"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Directory(err) => write!(f, "{err}"),
            Self::Media(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactBookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidContact(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Directory(err) => Some(err),
            Self::Media(err) => Some(err),
            Self::PermissionDenied(_)
            | Self::NoActiveContact
            | Self::ContactNotFound(_)
            | Self::InvalidImage(_) => None,
        }
    }
}

impl From<RepoError> for ContactBookError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DirectoryError> for ContactBookError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}

impl From<MediaError> for ContactBookError {
    fn from(value: MediaError) -> Self {
        Self::Media(value)
    }
}

impl From<ContactValidationError> for ContactBookError {
    fn from(value: ContactValidationError) -> Self {
        Self::InvalidContact(value)
    }
}

/// Contact book facade over a directory and one key-value store.
pub struct ContactBook<D: ContactDirectory, S: KeyValueStore> {
    directory: D,
    store: S,
    list: ContactListState,
    detail: ContactDetailState,
}

impl<D: ContactDirectory, S: KeyValueStore> ContactBook<D, S> {
    pub fn new(directory: D, store: S) -> Self {
        Self {
            directory,
            store,
            list: ContactListState::new(),
            detail: ContactDetailState::new(),
        }
    }

    pub fn list(&self) -> &ContactListState {
        &self.list
    }

    /// Mutable list state for search text and favorites-only mode.
    pub fn list_mut(&mut self) -> &mut ContactListState {
        &mut self.list
    }

    pub fn detail(&self) -> &ContactDetailState {
        &self.detail
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn favorites(&self) -> FavoritesRegistry<&S> {
        FavoritesRegistry::new(&self.store)
    }

    pub fn notes(&self) -> NoteStore<&S> {
        NoteStore::new(&self.store)
    }

    pub fn images(&self) -> ImageStore<&S> {
        ImageStore::new(&self.store)
    }

    /// Loads the roster and the favorites projection. Returns roster size.
    pub fn load_contacts(&mut self) -> Result<usize, ContactBookError> {
        let started_at = Instant::now();
        self.require_contacts_permission()?;

        let contacts = self.directory.list_contacts()?;
        if contacts.is_empty() {
            info!("event=roster_load module=contact_book status=empty");
        }
        let favorites = self.favorites().list_favorites();
        let total = contacts.len();
        self.list.load(contacts, &favorites);

        info!(
            "event=roster_load module=contact_book status=ok contacts={total} favorites={} duration_ms={}",
            favorites.len(),
            started_at.elapsed().as_millis()
        );
        Ok(total)
    }

    /// Toggles one favorite and reflects the persisted result in list state.
    pub fn toggle_favorite(&mut self, contact_id: &str) -> Result<bool, ContactBookError> {
        let registry = FavoritesRegistry::new(&self.store);
        Ok(self.list.toggle_favorite(&registry, contact_id)?)
    }

    /// Opens one contact: full lookup, then its notes and image.
    pub fn open_contact(&mut self, contact_id: &str) -> Result<(), ContactBookError> {
        let ticket = self.detail.switch_to(contact_id);

        let contact = match self.directory.get_contact_by_id(contact_id, DETAIL_FIELDS) {
            Ok(Some(contact)) => contact,
            Ok(None) => {
                self.detail.close();
                return Err(ContactBookError::ContactNotFound(contact_id.to_string()));
            }
            Err(err) => {
                self.detail.close();
                return Err(err.into());
            }
        };
        self.detail.apply_contact(ticket, Some(contact));
        self.load_detail(ticket, contact_id);
        Ok(())
    }

    /// Re-reads notes and image for the open contact.
    pub fn refresh_detail(&mut self) -> Result<(), ContactBookError> {
        let (ticket, contact_id) = self.active()?;
        self.load_detail(ticket, &contact_id);
        Ok(())
    }

    pub fn close_contact(&mut self) {
        self.detail.close();
    }

    /// Adds a note to the open contact and reloads its notes.
    pub fn add_note(&mut self, content: &str) -> Result<Note, ContactBookError> {
        let (ticket, contact_id) = self.active()?;
        let note = self.notes().add_note(&contact_id, content)?;
        let notes = self.notes().list_notes(&contact_id);
        self.detail.apply_notes(ticket, notes);
        Ok(note)
    }

    /// Deletes a note from the open contact. Unknown ids are a no-op.
    pub fn delete_note(&mut self, note_id: NoteId) -> Result<bool, ContactBookError> {
        let (ticket, contact_id) = self.active()?;
        let removed = self.notes().delete_note(&contact_id, note_id)?;
        if removed {
            let notes = self.notes().list_notes(&contact_id);
            self.detail.apply_notes(ticket, notes);
        }
        Ok(removed)
    }

    /// Lets the user pick a profile photo for the open contact.
    ///
    /// Returns the stored URI, or `None` when the pick was cancelled.
    pub fn pick_image<P: MediaPicker>(
        &mut self,
        picker: &P,
    ) -> Result<Option<String>, ContactBookError> {
        let (ticket, contact_id) = self.active()?;
        if !picker.request_permission().is_granted() {
            warn!("event=image_pick module=contact_book status=denied contact_id={contact_id}");
            return Err(ContactBookError::PermissionDenied(PermissionResource::MediaLibrary));
        }

        let Some(uri) = picker.pick_image(&ImageConstraints::default())? else {
            info!("event=image_pick module=contact_book status=cancelled contact_id={contact_id}");
            return Ok(None);
        };
        if image_file_name(&uri).is_none() {
            return Err(ContactBookError::InvalidImage(uri));
        }

        self.images().set_image_reference(&contact_id, &uri)?;
        self.detail.apply_image(ticket, Some(uri.clone()));
        Ok(Some(uri))
    }

    /// Creates a device contact and reloads the roster.
    pub fn add_contact(&mut self, input: NewContact) -> Result<ContactId, ContactBookError> {
        input.validate()?;
        self.require_contacts_permission()?;

        let id = self.directory.add_contact(&input)?;
        info!(
            "event=contact_add module=contact_book status=ok contact_id={id} kind={}",
            input.kind.as_str()
        );
        self.load_contacts()?;
        Ok(id)
    }

    fn load_detail(&mut self, ticket: LoadTicket, contact_id: &str) {
        let notes = self.notes().list_notes(contact_id);
        let image = self.images().get_image_reference(contact_id);
        let note_count = notes.len();
        let applied =
            self.detail.apply_notes(ticket, notes) && self.detail.apply_image(ticket, image);
        info!(
            "event=detail_load module=contact_book status={} contact_id={contact_id} notes={note_count}",
            if applied { "ok" } else { "stale" }
        );
    }

    fn active(&self) -> Result<(LoadTicket, ContactId), ContactBookError> {
        match (self.detail.current_ticket(), self.detail.active_id()) {
            (Some(ticket), Some(contact_id)) => Ok((ticket, contact_id.to_string())),
            _ => Err(ContactBookError::NoActiveContact),
        }
    }

    fn require_contacts_permission(&self) -> Result<(), ContactBookError> {
        if self.directory.request_permission().is_granted() {
            return Ok(());
        }
        warn!("event=permission module=contact_book status=denied resource=contacts");
        Err(ContactBookError::PermissionDenied(PermissionResource::Contacts))
    }
}
