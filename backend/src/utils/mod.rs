//! Collection of general utility functions.
//!
//! Password hashing and bearer token encoding live here; both are used by the
//! auth flows and know nothing about HTTP.

pub mod jwt;
pub mod password;
