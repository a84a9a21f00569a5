//! `SeaORM` entities for the tables written by the seeder.
//!
//! The remaining tables (orders, messages, favorites) are owned by the
//! request-handling services and only exist here as migrations.

pub mod categories;
pub mod products;
pub mod users;
