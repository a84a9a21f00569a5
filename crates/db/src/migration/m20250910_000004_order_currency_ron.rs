//! Data migration: order amounts are charged in RON, not USD.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "UPDATE orders SET currency = 'RON' WHERE currency = 'USD' OR currency IS NULL;",
        )
        .await?;
        db.execute_unprepared("ALTER TABLE orders ALTER COLUMN currency SET DEFAULT 'RON';")
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("ALTER TABLE orders ALTER COLUMN currency SET DEFAULT 'USD';")
            .await?;
        db.execute_unprepared("UPDATE orders SET currency = 'USD' WHERE currency = 'RON';")
            .await?;
        Ok(())
    }
}
