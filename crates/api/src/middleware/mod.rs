//! Request extractors shared by the handlers.
//!
//! - [`auth::AuthUser`] -- Loads the user named by a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Same, but anonymous requests pass through.
//! - [`rbac::RequireAdmin`] -- Requires `is_admin`.
//! - [`request_log::ClientInfo`] -- Client IP, host and user agent.

pub mod auth;
pub mod rbac;
pub mod request_log;
