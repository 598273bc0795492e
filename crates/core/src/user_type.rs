//! User type codes.
//!
//! The type is chosen at sign-up and decides how the login verifier
//! authenticates the account. Only types listed in the configured allow list
//! can sign up or log in.

/// Email + password account.
pub const USER_TYPE_EMAIL: &str = "10";
/// Google social account.
pub const USER_TYPE_GOOGLE: &str = "11";
/// Kakao social account.
pub const USER_TYPE_KAKAO: &str = "12";
/// Naver social account.
pub const USER_TYPE_NAVER: &str = "13";

/// Every type code the platform knows about.
pub const KNOWN_USER_TYPES: &[&str] = &[
    USER_TYPE_EMAIL,
    USER_TYPE_GOOGLE,
    USER_TYPE_KAKAO,
    USER_TYPE_NAVER,
];

/// Whether accounts of this type authenticate with a stored password.
pub fn uses_password(user_type: &str) -> bool {
    user_type == USER_TYPE_EMAIL
}
