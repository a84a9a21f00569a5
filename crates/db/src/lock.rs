//! Advisory lock serializing schema-changing commands.
//!
//! `migrate`, `init`, and `reset` must hold this lock so two concurrent
//! invocations cannot interleave schema changes. Postgres advisory locks
//! are session scoped: callers must connect through a single-connection
//! pool (`connect_single`) so acquire, schema change, and release all run
//! on the same session. A session that dies releases the lock with it.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Statement};

/// Stable key identifying the schema migration lock. Changing it would
/// let binaries built before and after the change migrate concurrently.
const MIGRATION_LOCK_KEY: i64 = 727_350_216_014;

/// Guard for the schema migration advisory lock.
#[must_use = "the lock is held until release() is called or the session ends"]
pub struct MigrationLock(());

impl MigrationLock {
    /// Attempts to take the lock without waiting.
    ///
    /// # Errors
    ///
    /// Fails with `DbErr::Custom` when another invocation already holds
    /// the lock, and with the underlying error if the query itself fails.
    pub async fn acquire(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let stmt = Statement::from_string(
            DbBackend::Postgres,
            format!("SELECT pg_try_advisory_lock({MIGRATION_LOCK_KEY}) AS acquired"),
        );
        let row = db
            .query_one(stmt)
            .await?
            .ok_or_else(|| DbErr::Custom("advisory lock query returned no row".to_owned()))?;
        let acquired: bool = row.try_get("", "acquired")?;

        if acquired {
            Ok(Self(()))
        } else {
            Err(DbErr::Custom(
                "another migration is in progress (advisory lock held)".to_owned(),
            ))
        }
    }

    /// Releases the lock.
    ///
    /// Dropping the guard without calling this keeps the lock until the
    /// session closes, which still cannot outlive the short-lived CLI
    /// process holding it.
    pub async fn release(self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let stmt = Statement::from_string(
            DbBackend::Postgres,
            format!("SELECT pg_advisory_unlock({MIGRATION_LOCK_KEY})"),
        );
        db.execute(stmt).await?;
        Ok(())
    }
}
