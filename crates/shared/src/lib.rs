//! Shared types, errors, and configuration for Tavola.
//!
//! This crate provides the pieces used across all other crates:
//! - Application configuration loaded from files and environment
//! - Application-wide error types
//! - Password hashing for seeded accounts

pub mod auth;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
