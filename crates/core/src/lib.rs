//! Domain types, message catalog, and request validation shared by the
//! repository and HTTP layers. This crate has no I/O.

pub mod codes;
pub mod error;
pub mod masking;
pub mod object_key;
pub mod rating;
pub mod search;
pub mod types;
pub mod user_type;
pub mod validation;
