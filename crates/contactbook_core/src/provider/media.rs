//! Media library picker contract.

use super::PermissionStatus;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Constraints forwarded to the picker UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageConstraints {
    pub images_only: bool,
    pub allows_editing: bool,
    /// Crop aspect as `(width, height)`.
    pub aspect: (u32, u32),
    /// Compression quality in `0.0..=1.0`.
    pub quality: f32,
}

impl Default for ImageConstraints {
    fn default() -> Self {
        Self {
            images_only: true,
            allows_editing: true,
            aspect: (4, 3),
            quality: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaError {
    pub message: String,
}

impl MediaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for MediaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "media picker error: {}", self.message)
    }
}

impl Error for MediaError {}

/// Device media library picker.
pub trait MediaPicker {
    fn request_permission(&self) -> PermissionStatus;
    /// Returns the picked local URI, or `None` when the user cancelled.
    fn pick_image(&self, constraints: &ImageConstraints) -> Result<Option<String>, MediaError>;
}

/// Picker replaying queued selections; an empty queue means cancel.
#[derive(Debug)]
pub struct ScriptedMediaPicker {
    picks: RefCell<VecDeque<Option<String>>>,
    permission: PermissionStatus,
}

impl ScriptedMediaPicker {
    pub fn new(picks: impl IntoIterator<Item = Option<String>>) -> Self {
        Self {
            picks: RefCell::new(picks.into_iter().collect()),
            permission: PermissionStatus::Granted,
        }
    }

    pub fn denied() -> Self {
        Self {
            picks: RefCell::new(VecDeque::new()),
            permission: PermissionStatus::Denied,
        }
    }
}

impl MediaPicker for ScriptedMediaPicker {
    fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    fn pick_image(&self, _constraints: &ImageConstraints) -> Result<Option<String>, MediaError> {
        Ok(self.picks.borrow_mut().pop_front().flatten())
    }
}

/// Returns the last path segment of a picked URI, if it names a file.
pub fn image_file_name(uri: &str) -> Option<&str> {
    uri.rsplit('/').next().filter(|segment| !segment.is_empty())
}
