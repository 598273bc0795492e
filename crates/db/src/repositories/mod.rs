//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

mod counters;

pub mod actor_repo;
pub mod genre_repo;
pub mod like_repo;
pub mod login_log_repo;
pub mod rating_repo;
pub mod review_repo;
pub mod staff_repo;
pub mod user_repo;
pub mod video_repo;
pub mod view_log_repo;

pub use actor_repo::ActorRepo;
pub use genre_repo::GenreRepo;
pub use like_repo::LikeRepo;
pub use login_log_repo::LoginLogRepo;
pub use rating_repo::RatingRepo;
pub use review_repo::ReviewRepo;
pub use staff_repo::StaffRepo;
pub use user_repo::UserRepo;
pub use video_repo::VideoRepo;
pub use view_log_repo::ViewLogRepo;

/// Build a `LIKE`/`ILIKE` pattern matching `needle` anywhere, with the
/// wildcard characters in `needle` escaped.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
