//! External collaborators consumed by the core.
//!
//! # Responsibility
//! - Define the device contact directory and media picker seams.
//! - Provide in-process implementations for tests and the CLI smoke run.
//!
//! # Invariants
//! - Callers check `request_permission()` before any other call.

pub mod directory;
pub mod media;

/// Outcome of a runtime permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}
