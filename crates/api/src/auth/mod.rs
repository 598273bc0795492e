//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access/refresh token generation and validation.
//! - [`verifier`] -- The login checklist and login-attempt logging.

pub mod jwt;
pub mod password;
pub mod verifier;
