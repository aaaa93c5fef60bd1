//! Persistence layer.

pub mod user_repository;
