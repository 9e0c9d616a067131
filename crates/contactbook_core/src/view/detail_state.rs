//! Active contact detail state.
//!
//! # Responsibility
//! - Track which contact is open and the notes/image loaded for it.
//! - Discard load results that arrive after the view moved on.
//!
//! # Invariants
//! - Switching contacts clears contact, notes and image before any new load.
//! - A result is applied only with a ticket from the current generation.

use crate::model::contact::{Contact, ContactId};
use crate::model::note::Note;
use log::debug;

/// Proof that a load was started for the current active contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Detail screen state.
#[derive(Debug, Default)]
pub struct ContactDetailState {
    active: Option<ContactId>,
    generation: u64,
    contact: Option<Contact>,
    notes: Vec<Note>,
    custom_image: Option<String>,
}

impl ContactDetailState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `contact_id` active, dropping everything loaded for the previous one.
    pub fn switch_to(&mut self, contact_id: impl Into<ContactId>) -> LoadTicket {
        let contact_id = contact_id.into();
        self.reset();
        debug!(
            "event=detail_switch module=detail_view status=ok contact_id={contact_id} generation={}",
            self.generation
        );
        self.active = Some(contact_id);
        self.ticket()
    }

    /// Clears the detail view; outstanding tickets become stale.
    pub fn close(&mut self) {
        self.reset();
        self.active = None;
    }

    /// Ticket for reloads of the currently active contact.
    pub fn current_ticket(&self) -> Option<LoadTicket> {
        self.active.as_ref().map(|_| self.ticket())
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.active.is_some() && ticket.generation == self.generation
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn apply_contact(&mut self, ticket: LoadTicket, contact: Option<Contact>) -> bool {
        if !self.accept(ticket, "contact") {
            return false;
        }
        self.contact = contact;
        true
    }

    pub fn apply_notes(&mut self, ticket: LoadTicket, notes: Vec<Note>) -> bool {
        if !self.accept(ticket, "notes") {
            return false;
        }
        self.notes = notes;
        true
    }

    pub fn apply_image(&mut self, ticket: LoadTicket, image: Option<String>) -> bool {
        if !self.accept(ticket, "image") {
            return false;
        }
        self.custom_image = image;
        true
    }

    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Notes held for `contact_id`; `None` unless it is the active contact.
    pub fn notes_for(&self, contact_id: &str) -> Option<&[Note]> {
        self.is_active(contact_id).then_some(self.notes.as_slice())
    }

    /// Custom image held for `contact_id`; `None` unless it is active and set.
    pub fn image_for(&self, contact_id: &str) -> Option<&str> {
        if !self.is_active(contact_id) {
            return None;
        }
        self.custom_image.as_deref()
    }

    /// Image to display: the cached custom image, else the directory photo.
    pub fn display_image(&self) -> Option<&str> {
        self.custom_image
            .as_deref()
            .or_else(|| self.contact.as_ref().and_then(Contact::directory_image))
    }

    fn is_active(&self, contact_id: &str) -> bool {
        self.active.as_deref() == Some(contact_id)
    }

    fn ticket(&self) -> LoadTicket {
        LoadTicket {
            generation: self.generation,
        }
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.contact = None;
        self.notes.clear();
        self.custom_image = None;
    }

    fn accept(&self, ticket: LoadTicket, part: &'static str) -> bool {
        if self.is_current(ticket) {
            return true;
        }
        debug!(
            "event=detail_load module=detail_view status=stale_discarded part={part} ticket_generation={} generation={}",
            ticket.generation, self.generation
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::ContactDetailState;
    use crate::model::contact::Contact;
    use crate::model::note::Note;

    #[test]
    fn switching_drops_previous_contact_state() {
        let mut state = ContactDetailState::new();
        let ticket_a = state.switch_to("a");
        state.apply_notes(ticket_a, vec![Note::try_new(1, "note a").unwrap()]);
        state.apply_image(ticket_a, Some("file:///a.jpg".to_string()));
        assert_eq!(state.notes_for("a").map(|notes| notes.len()), Some(1));

        state.switch_to("b");
        assert!(state.notes_for("a").is_none());
        assert!(state.image_for("a").is_none());
        assert_eq!(state.notes_for("b"), Some(&[][..]));
        assert_eq!(state.display_image(), None);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut state = ContactDetailState::new();
        let ticket_a = state.switch_to("a");
        let ticket_b = state.switch_to("b");
        assert!(!state.apply_notes(ticket_a, vec![Note::try_new(1, "late").unwrap()]));
        assert!(state.notes().is_empty());
        assert!(state.apply_notes(ticket_b, vec![Note::try_new(2, "fresh").unwrap()]));
        assert_eq!(state.notes()[0].content, "fresh");
    }

    #[test]
    fn close_invalidates_outstanding_ticket() {
        let mut state = ContactDetailState::new();
        let ticket = state.switch_to("a");
        state.close();
        assert!(!state.apply_image(ticket, Some("file:///a.jpg".to_string())));
        assert!(state.current_ticket().is_none());
    }

    #[test]
    fn custom_image_overrides_directory_photo() {
        let mut state = ContactDetailState::new();
        let ticket = state.switch_to("a");
        let mut contact = Contact::new("a", "Ana");
        contact.image_available = true;
        contact.image_uri = Some("content://photo/a".to_string());
        state.apply_contact(ticket, Some(contact));
        assert_eq!(state.display_image(), Some("content://photo/a"));

        state.apply_image(ticket, Some("file:///picked.jpg".to_string()));
        assert_eq!(state.display_image(), Some("file:///picked.jpg"));
    }
}
