//! Database layer for Tavola.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the tables the seeder writes
//! - Versioned schema migrations and lifecycle queries over them
//! - The advisory lock serializing schema-changing commands
//! - Idempotent sample-catalogue seeding

pub mod entities;
pub mod lock;
pub mod migration;
pub mod seed;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a connection backed by a single-connection pool.
///
/// Advisory locks are session scoped; commands that take the migration
/// lock must run acquire, schema change, and release on the same session,
/// which a one-connection pool guarantees.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_single(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options.max_connections(1);
    Database::connect(options).await
}
