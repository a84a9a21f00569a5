//! Database migrations and lifecycle queries.
//!
//! Migrations are managed with `sea-orm-migration`; the engine records
//! applied versions in its `seaql_migrations` bookkeeping table. Version
//! names are `m{YYYYMMDD}_{SEQ}_{slug}` and their lexicographic order is
//! the apply order.

pub mod generate;

pub use sea_orm_migration::prelude::*;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Statement};

mod m20240101_000001_initial;
mod m20240115_000002_product_variants;
mod m20240201_000003_orders;
mod m20250910_000004_order_currency_ron;

/// Migrator holding the ordered list of schema versions.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_initial::Migration),
            Box::new(m20240115_000002_product_variants::Migration),
            Box::new(m20240201_000003_orders::Migration),
            Box::new(m20250910_000004_order_currency_ron::Migration),
        ]
    }
}

/// A schema version recorded as applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    /// Version name, e.g. `m20240101_000001_initial`.
    pub version: String,
    /// When the version was applied.
    pub applied_at: DateTime<Utc>,
}

/// One entry of the migration history: a registered version, applied or
/// still pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Version name.
    pub version: String,
    /// Apply timestamp; `None` while the version is pending.
    pub applied_at: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    /// Whether this version has been applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        self.applied_at.is_some()
    }
}

/// Returns the applied versions in version order.
///
/// An uninitialized database (no bookkeeping table) reports an empty list
/// rather than an error, so `current` and `history` stay usable before
/// `init`.
pub async fn applied_migrations(
    db: &DatabaseConnection,
) -> Result<Vec<AppliedMigration>, DbErr> {
    if !bookkeeping_present(db).await? {
        return Ok(Vec::new());
    }

    let models = Migrator::get_migration_models(db).await?;
    let mut applied: Vec<AppliedMigration> = models
        .into_iter()
        .map(|model| AppliedMigration {
            version: model.version,
            applied_at: DateTime::from_timestamp(model.applied_at, 0)
                .unwrap_or(DateTime::UNIX_EPOCH),
        })
        .collect();

    // Version order and apply order coincide; sort so `current` stays
    // well defined even if the table was touched by hand.
    applied.sort_by(|a, b| a.version.cmp(&b.version));
    Ok(applied)
}

/// Returns the single most recently applied version, if any.
pub async fn current_version(
    db: &DatabaseConnection,
) -> Result<Option<AppliedMigration>, DbErr> {
    Ok(applied_migrations(db).await?.into_iter().next_back())
}

/// Returns the full migration history in chronological order: applied
/// versions first (with timestamps), then registered-but-pending ones.
pub async fn history(db: &DatabaseConnection) -> Result<Vec<HistoryEntry>, DbErr> {
    let applied = applied_migrations(db).await?;
    let applied_names: HashSet<String> =
        applied.iter().map(|m| m.version.clone()).collect();

    let mut entries: Vec<HistoryEntry> = applied
        .into_iter()
        .map(|m| HistoryEntry {
            version: m.version,
            applied_at: Some(m.applied_at),
        })
        .collect();

    for migration in Migrator::migrations() {
        if !applied_names.contains(migration.name()) {
            entries.push(HistoryEntry {
                version: migration.name().to_string(),
                applied_at: None,
            });
        }
    }

    Ok(entries)
}

/// Checks whether the engine's bookkeeping table exists.
async fn bookkeeping_present(db: &DatabaseConnection) -> Result<bool, DbErr> {
    let stmt = Statement::from_string(
        DbBackend::Postgres,
        "SELECT to_regclass('seaql_migrations') IS NOT NULL AS present".to_owned(),
    );
    let row = db.query_one(stmt).await?;
    match row {
        Some(row) => row.try_get("", "present"),
        None => Ok(false),
    }
}
