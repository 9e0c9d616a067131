//! Domain model for contacts and the locally persisted state attached to them.
//!
//! # Responsibility
//! - Define the directory contact shape consumed read-only by the core.
//! - Define favorites, notes and their validation rules.

pub mod contact;
pub mod favorites;
pub mod note;
