//! Device contact directory contract.

use super::PermissionStatus;
use crate::model::contact::{Contact, ContactField, ContactId, NewContact};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Directory provider failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryError {
    pub message: String,
}

impl DirectoryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "contact directory error: {}", self.message)
    }
}

impl Error for DirectoryError {}

/// Device contacts provider.
pub trait ContactDirectory {
    /// Prompts for (or reports) contacts access.
    fn request_permission(&self) -> PermissionStatus;
    /// Lists every contact with summary fields only.
    fn list_contacts(&self) -> Result<Vec<Contact>, DirectoryError>;
    /// Full-detail lookup restricted to the requested collections.
    fn get_contact_by_id(
        &self,
        id: &str,
        fields: &[ContactField],
    ) -> Result<Option<Contact>, DirectoryError>;
    /// Creates one device contact and returns its id.
    fn add_contact(&self, contact: &NewContact) -> Result<ContactId, DirectoryError>;
}

/// Directory held in memory; new contacts get uuid v4 ids.
#[derive(Debug)]
pub struct InMemoryContactDirectory {
    contacts: RefCell<Vec<Contact>>,
    permission: PermissionStatus,
}

impl Default for InMemoryContactDirectory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryContactDirectory {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: RefCell::new(contacts),
            permission: PermissionStatus::Granted,
        }
    }

    /// Directory that refuses access.
    pub fn denied() -> Self {
        Self {
            contacts: RefCell::new(Vec::new()),
            permission: PermissionStatus::Denied,
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.borrow().is_empty()
    }
}

impl ContactDirectory for InMemoryContactDirectory {
    fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    fn list_contacts(&self) -> Result<Vec<Contact>, DirectoryError> {
        Ok(self.contacts.borrow().iter().map(summary_of).collect())
    }

    fn get_contact_by_id(
        &self,
        id: &str,
        fields: &[ContactField],
    ) -> Result<Option<Contact>, DirectoryError> {
        let contacts = self.contacts.borrow();
        let Some(full) = contacts.iter().find(|contact| contact.id == id) else {
            return Ok(None);
        };

        let mut contact = summary_of(full);
        contact.first_name = full.first_name.clone();
        contact.is_favorite = full.is_favorite;
        contact.image_available = full.image_available;
        for field in fields {
            match field {
                ContactField::PhoneNumbers => contact.phone_numbers = full.phone_numbers.clone(),
                ContactField::Emails => contact.emails = full.emails.clone(),
                ContactField::Addresses => contact.addresses = full.addresses.clone(),
                ContactField::Image => contact.image_uri = full.image_uri.clone(),
            }
        }
        Ok(Some(contact))
    }

    fn add_contact(&self, contact: &NewContact) -> Result<ContactId, DirectoryError> {
        let id = Uuid::new_v4().to_string();
        self.contacts
            .borrow_mut()
            .push(contact.clone().into_contact(id.clone()));
        Ok(id)
    }
}

/// Roster projection: id, name, primary phone, kind.
fn summary_of(contact: &Contact) -> Contact {
    Contact {
        id: contact.id.clone(),
        name: contact.name.clone(),
        phone_numbers: contact.phone_numbers.iter().take(1).cloned().collect(),
        kind: contact.kind,
        ..Contact::default()
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactDirectory, InMemoryContactDirectory};
    use crate::model::contact::{
        Contact, ContactField, EmailAddress, NewContact, PhoneNumber, DETAIL_FIELDS,
    };

    fn sample() -> Contact {
        let mut contact = Contact::new("1", "Ana Souza");
        contact.phone_numbers = vec![
            PhoneNumber {
                label: "mobile".to_string(),
                number: "11911112222".to_string(),
            },
            PhoneNumber {
                label: "home".to_string(),
                number: "1133334444".to_string(),
            },
        ];
        contact.emails = vec![EmailAddress {
            label: "work".to_string(),
            email: "ana@example.com".to_string(),
        }];
        contact
    }

    #[test]
    fn roster_carries_summary_fields_only() {
        let directory = InMemoryContactDirectory::new(vec![sample()]);
        let roster = directory.list_contacts().unwrap();
        assert_eq!(roster[0].phone_numbers.len(), 1);
        assert!(roster[0].emails.is_empty());
    }

    #[test]
    fn lookup_returns_requested_fields() {
        let directory = InMemoryContactDirectory::new(vec![sample()]);
        let full = directory
            .get_contact_by_id("1", DETAIL_FIELDS)
            .unwrap()
            .unwrap();
        assert_eq!(full.phone_numbers.len(), 2);
        assert_eq!(full.emails.len(), 1);

        let partial = directory
            .get_contact_by_id("1", &[ContactField::Emails])
            .unwrap()
            .unwrap();
        assert_eq!(partial.phone_numbers.len(), 1);
        assert!(directory.get_contact_by_id("missing", &[]).unwrap().is_none());
    }

    #[test]
    fn image_uri_is_returned_only_when_requested() {
        let mut contact = sample();
        contact.image_available = true;
        contact.image_uri = Some("content://photo/1".to_string());
        let directory = InMemoryContactDirectory::new(vec![contact]);

        let without = directory
            .get_contact_by_id("1", &[ContactField::PhoneNumbers])
            .unwrap()
            .unwrap();
        assert!(without.image_available);
        assert_eq!(without.image_uri, None);

        let with = directory
            .get_contact_by_id("1", DETAIL_FIELDS)
            .unwrap()
            .unwrap();
        assert_eq!(with.image_uri.as_deref(), Some("content://photo/1"));
    }

    #[test]
    fn added_contact_gets_fresh_id() {
        let directory = InMemoryContactDirectory::default();
        let id = directory
            .add_contact(&NewContact {
                name: "Bruno".to_string(),
                ..NewContact::default()
            })
            .unwrap();
        assert!(!id.is_empty());
        assert_eq!(directory.list_contacts().unwrap()[0].id, id);
    }
}
