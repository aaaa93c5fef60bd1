//! Authentication module for managing user accounts and access control.
//!
//! This module provides the public interface for signup, login, token
//! verification and the authorization middleware that guards protected routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
