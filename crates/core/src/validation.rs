//! Field validators for user input.
//!
//! Each validator checks its rules in a fixed order and reports the first
//! failure as a [`CoreError::Validation`] carrying the matching catalog code.

use std::sync::LazyLock;

use regex::Regex;

use crate::codes::Code;
use crate::error::CoreError;
use crate::user_type::{USER_TYPE_EMAIL, KNOWN_USER_TYPES};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

/// Characters accepted as a password "symbol".
const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+{}|:\"<>?`-=[];',./";

/// Length bounds and composition rules applied to user fields.
///
/// Lengths are measured in characters, not bytes.
#[derive(Debug, Clone)]
pub struct UserPolicy {
    pub email_length_min: usize,
    pub email_length_max: usize,
    pub nickname_length_min: usize,
    pub nickname_length_max: usize,
    pub password_length_min: usize,
    pub password_length_max: usize,
    /// Reject passwords containing whitespace.
    pub password_reject_space: bool,
    /// Require at least one ASCII letter.
    pub password_require_word: bool,
    /// Require at least one ASCII digit.
    pub password_require_number: bool,
    /// Require at least one character from the symbol set.
    pub password_require_symbol: bool,
    /// User type codes accepted at sign-up and login.
    pub allowed_user_types: Vec<String>,
}

impl Default for UserPolicy {
    fn default() -> Self {
        Self {
            email_length_min: 6,
            email_length_max: 50,
            nickname_length_min: 2,
            nickname_length_max: 20,
            password_length_min: 8,
            password_length_max: 22,
            password_reject_space: true,
            password_require_word: true,
            password_require_number: true,
            password_require_symbol: true,
            allowed_user_types: vec![USER_TYPE_EMAIL.to_string()],
        }
    }
}

impl UserPolicy {
    /// Validate an email address.
    pub fn validate_email(&self, email: &str) -> Result<(), CoreError> {
        if email.is_empty() {
            return invalid(Code::ValidEmailRequireErr);
        }
        let len = email.chars().count();
        if len < self.email_length_min || len > self.email_length_max {
            return invalid(Code::ValidEmailLengthErr);
        }
        if email.contains(char::is_whitespace) || !EMAIL_RE.is_match(email) {
            return invalid(Code::ValidEmailPatternErr);
        }
        Ok(())
    }

    /// Validate a nickname.
    pub fn validate_nickname(&self, nickname: &str) -> Result<(), CoreError> {
        if nickname.is_empty() {
            return invalid(Code::ValidNickRequireErr);
        }
        let len = nickname.chars().count();
        if len < self.nickname_length_min || len > self.nickname_length_max {
            return invalid(Code::ValidNickLengthErr);
        }
        if nickname.contains(char::is_whitespace) {
            return invalid(Code::ValidNickSpaceErr);
        }
        Ok(())
    }

    /// Validate a plaintext password against the composition rules.
    pub fn validate_password(&self, password: &str) -> Result<(), CoreError> {
        if password.is_empty() {
            return invalid(Code::ValidPwdRequireErr);
        }
        if self.password_reject_space && password.contains(char::is_whitespace) {
            return invalid(Code::ValidPwdIncludeSpaceErr);
        }
        let len = password.chars().count();
        if len < self.password_length_min || len > self.password_length_max {
            return invalid(Code::ValidPwdLengthErr);
        }
        if self.password_require_word && !password.chars().any(|c| c.is_ascii_alphabetic()) {
            return invalid(Code::ValidPwdNotIncWordErr);
        }
        if self.password_require_number && !password.chars().any(|c| c.is_ascii_digit()) {
            return invalid(Code::ValidPwdNotIncNumberErr);
        }
        if self.password_require_symbol && !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
        {
            return invalid(Code::ValidPwdNotIncSimbolErr);
        }
        Ok(())
    }

    /// Validate a user type code against the allow list.
    pub fn validate_user_type(&self, user_type: &str) -> Result<(), CoreError> {
        let known = KNOWN_USER_TYPES.contains(&user_type);
        let allowed = self.allowed_user_types.iter().any(|t| t == user_type);
        if known && allowed {
            Ok(())
        } else {
            invalid(Code::UserTypeErr)
        }
    }
}

/// Validate a birth year: four digits, not in the future, not before 1900.
pub fn validate_birth_year(year: i32, current_year: i32) -> Result<(), CoreError> {
    if (1900..=current_year).contains(&year) {
        Ok(())
    } else {
        invalid(Code::InvalidParamBirthYear)
    }
}

fn invalid(code: Code) -> Result<(), CoreError> {
    Err(CoreError::Validation(code))
}
