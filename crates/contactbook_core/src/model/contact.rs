//! Contact records supplied by the device directory.
//!
//! # Responsibility
//! - Define the read-only contact shape the core reconciles against.
//! - Define the creation input accepted by the directory.
//!
//! # Invariants
//! - `ContactId` is opaque and stable per device record.
//! - The native `is_favorite` flag is never written by this crate; app
//!   favorites live in the favorites registry.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque device contact identifier.
pub type ContactId = String;

/// Contact kind reported by the directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    #[default]
    Person,
    Company,
}

impl ContactKind {
    /// Parses the add-contact form selector; anything but a person is a company.
    pub fn from_form_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "person" | "pessoa" => Self::Person,
            _ => Self::Company,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Company => "company",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub label: String,
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub label: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub label: String,
    pub street: String,
}

/// Fields that can be requested on a full contact lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    PhoneNumbers,
    Emails,
    Addresses,
    Image,
}

/// Fields requested when a contact is opened for detail display.
pub const DETAIL_FIELDS: &[ContactField] = &[
    ContactField::PhoneNumbers,
    ContactField::Emails,
    ContactField::Addresses,
    ContactField::Image,
];

/// Directory contact record.
///
/// Roster listings only fill summary fields (id, name, primary phone, kind);
/// full lookups fill the requested collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    /// Display name used for search.
    pub name: String,
    pub first_name: Option<String>,
    pub phone_numbers: Vec<PhoneNumber>,
    pub emails: Vec<EmailAddress>,
    pub addresses: Vec<PostalAddress>,
    pub kind: ContactKind,
    /// Directory-native favorite flag.
    pub is_favorite: bool,
    pub image_available: bool,
    pub image_uri: Option<String>,
}

impl Contact {
    pub fn new(id: impl Into<ContactId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// First phone number, shown on list rows.
    pub fn primary_phone(&self) -> Option<&str> {
        self.phone_numbers.first().map(|phone| phone.number.as_str())
    }

    /// Directory image URI when the record reports one as available.
    pub fn directory_image(&self) -> Option<&str> {
        if self.image_available {
            self.image_uri.as_deref()
        } else {
            None
        }
    }

    /// Case-insensitive substring match against the display name.
    pub fn name_matches(&self, needle_lowercase: &str) -> bool {
        needle_lowercase.is_empty() || self.name.to_lowercase().contains(needle_lowercase)
    }
}

/// Validation failure for contact creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyName,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "contact name cannot be empty"),
        }
    }
}

impl Error for ContactValidationError {}

/// Add-contact form input.
///
/// Each single-valued input becomes one labelled entry on the created
/// contact: phone `mobile`, email `work`, address `home`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub kind: ContactKind,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl NewContact {
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        Ok(())
    }

    /// Builds the directory record for this input under the given id.
    pub fn into_contact(self, id: impl Into<ContactId>) -> Contact {
        let name = self.name.trim().to_string();
        Contact {
            id: id.into(),
            first_name: Some(name.clone()),
            name,
            phone_numbers: vec![PhoneNumber {
                label: "mobile".to_string(),
                number: self.phone,
            }],
            emails: vec![EmailAddress {
                label: "work".to_string(),
                email: self.email,
            }],
            addresses: vec![PostalAddress {
                label: "home".to_string(),
                street: self.address,
            }],
            kind: self.kind,
            ..Contact::default()
        }
    }
}
