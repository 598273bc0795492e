//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO (all `Option` fields) where the entity is editable

pub mod actor;
pub mod genre;
pub mod like;
pub mod login_log;
pub mod rating;
pub mod review;
pub mod staff;
pub mod user;
pub mod video;

/// Prefix a stored object key with the public base URL.
///
/// Values that are already absolute URLs are returned unchanged.
pub fn public_url(base_url: &str, key: &str) -> String {
    if key.starts_with("http://") || key.starts_with("https://") {
        return key.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}
