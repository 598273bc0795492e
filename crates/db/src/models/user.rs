//! User entity model, DTOs and response tiers.

use reviewniverse_core::masking::mask_email;
use reviewniverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::public_url;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use one of the response tiers ([`UserPublic`], [`UserProfile`], [`UserMe`]).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub user_type: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub profile_text: Option<String>,
    pub birth_year: Option<i32>,
    pub level: i32,
    pub mileage: i32,
    pub like_count: i32,
    pub review_count: i32,
    pub rating_count: i32,
    pub is_active: bool,
    pub is_block: bool,
    pub is_admin: bool,
    pub is_email_verify: bool,
    pub is_privacy_agree: bool,
    pub is_terms_agree: bool,
    pub is_age_agree: bool,
    pub is_marketing_agree: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Whether all mandatory agreements were accepted.
    pub fn has_required_agreements(&self) -> bool {
        self.is_privacy_agree && self.is_terms_agree && self.is_age_agree
    }
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub user_type: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub nickname: String,
    pub is_privacy_agree: bool,
    pub is_terms_agree: bool,
    pub is_age_agree: bool,
    pub is_marketing_agree: bool,
}

/// DTO for updating a user's own profile. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub nickname: Option<String>,
    pub password_hash: Option<String>,
    pub birth_year: Option<i32>,
    pub profile_image: Option<String>,
    pub profile_text: Option<String>,
    pub is_marketing_agree: Option<bool>,
}

/// Filters for the user search. `None` fields are not applied.
#[derive(Debug, Default)]
pub struct UserSearch {
    pub user_id: Option<DbId>,
    /// Substring match on nickname.
    pub nickname: Option<String>,
    /// Substring match on email.
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Response tiers
// ---------------------------------------------------------------------------

/// What any visitor may see about a user. The email is masked.
#[derive(Debug, Clone, Serialize)]
pub struct UserPublic {
    pub id: DbId,
    pub email: String,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub profile_text: Option<String>,
    pub level: i32,
    pub like_count: i32,
    pub review_count: i32,
    pub rating_count: i32,
}

/// Profile page view: public fields plus account details.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub public: UserPublic,
    pub user_type: String,
    pub birth_year: Option<i32>,
    pub mileage: i32,
    pub created_at: Timestamp,
}

/// The owner's own view. The email is shown unmasked.
#[derive(Debug, Clone, Serialize)]
pub struct UserMe {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub is_email_verify: bool,
    pub is_privacy_agree: bool,
    pub is_terms_agree: bool,
    pub is_age_agree: bool,
    pub is_marketing_agree: bool,
    pub updated_at: Timestamp,
}

impl UserPublic {
    pub fn from_user(user: &User, image_base_url: &str) -> Self {
        Self {
            id: user.id,
            email: mask_email(&user.email),
            nickname: user.nickname.clone(),
            profile_image: user
                .profile_image
                .as_deref()
                .map(|key| public_url(image_base_url, key)),
            profile_text: user.profile_text.clone(),
            level: user.level,
            like_count: user.like_count,
            review_count: user.review_count,
            rating_count: user.rating_count,
        }
    }
}

impl UserProfile {
    pub fn from_user(user: &User, image_base_url: &str) -> Self {
        Self {
            public: UserPublic::from_user(user, image_base_url),
            user_type: user.user_type.clone(),
            birth_year: user.birth_year,
            mileage: user.mileage,
            created_at: user.created_at,
        }
    }
}

impl UserMe {
    pub fn from_user(user: &User, image_base_url: &str) -> Self {
        let mut profile = UserProfile::from_user(user, image_base_url);
        profile.public.email = user.email.clone();
        Self {
            profile,
            is_email_verify: user.is_email_verify,
            is_privacy_agree: user.is_privacy_agree,
            is_terms_agree: user.is_terms_agree,
            is_age_agree: user.is_age_agree,
            is_marketing_agree: user.is_marketing_agree,
            updated_at: user.updated_at,
        }
    }
}
