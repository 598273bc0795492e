//! Object storage key construction and upload checks.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::codes::Code;
use crate::error::CoreError;

/// Top-level prefix an uploaded object is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Actor,
    Staff,
    Video,
    Profile,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Actor => "actor",
            ObjectKind::Staff => "staff",
            ObjectKind::Video => "video",
            ObjectKind::Profile => "profile",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actor" => Ok(ObjectKind::Actor),
            "staff" => Ok(ObjectKind::Staff),
            "video" => Ok(ObjectKind::Video),
            "profile" => Ok(ObjectKind::Profile),
            _ => Err(CoreError::Validation(Code::FileStoreFail)),
        }
    }
}

/// Extract the normalized extension of an uploaded filename.
///
/// The extension is lowercased and anything after a `?` or `/` is dropped,
/// so `"Photo.JPG?raw=1"` yields `"jpg"`. Returns `None` when the filename has
/// no extension.
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.split(['?', '/']).next().unwrap_or_default();
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

/// Build the storage key `<kind>/<key>/<uuid>.<ext>` for an upload.
///
/// `key` scopes the object (usually the owning entity id). Only the
/// extension of the uploaded filename is kept; the stem is a random UUID.
pub fn make_object_key(kind: ObjectKind, key: &str, filename: &str) -> Result<String, CoreError> {
    if key.trim().is_empty() {
        return Err(CoreError::Validation(Code::FileStoreFail));
    }
    if filename.trim().is_empty() {
        return Err(CoreError::Validation(Code::FileNotFound));
    }
    let ext = file_extension(filename).ok_or(CoreError::Validation(Code::FileTypeErr))?;
    Ok(format!("{kind}/{key}/{}.{ext}", Uuid::new_v4()))
}

/// Check an extension against an allow list (case-insensitive).
pub fn ensure_allowed_extension(ext: &str, allowed: &[String]) -> Result<(), CoreError> {
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)) {
        Ok(())
    } else {
        Err(CoreError::Validation(Code::FileTypeErr))
    }
}

/// Check a file size in bytes against the upload limit.
pub fn ensure_within_size_limit(size: usize, limit: usize) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::Validation(Code::FileNotFound));
    }
    if size > limit {
        return Err(CoreError::Validation(Code::FileSizeErr));
    }
    Ok(())
}
