//! In-memory reconciliation of directory data with local state.
//!
//! # Responsibility
//! - Hold the favorites projection and filtered roster for list display.
//! - Hold the active contact's notes and image for detail display.
//!
//! # Invariants
//! - Visible favorite state equals persisted state once a mutation settles.
//! - Detail state never exposes data for a contact other than the active one.

pub mod detail_state;
pub mod list_state;
pub mod mutation;
