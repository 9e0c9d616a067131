//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate collaborators and stores into presentation-level operations.
//! - Keep presentation code decoupled from storage details.

pub mod contact_book;
