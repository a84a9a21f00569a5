//! Product variants: one variant axis per product, absolute variant prices.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(VARIANT_COLUMNS_SQL).await?;
        db.execute_unprepared(PRODUCT_VARIANTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS product_variants CASCADE;")
            .await?;
        db.execute_unprepared(
            "ALTER TABLE products
                DROP COLUMN IF EXISTS has_variants,
                DROP COLUMN IF EXISTS variant_type_en,
                DROP COLUMN IF EXISTS variant_type_ro;",
        )
        .await?;
        Ok(())
    }
}

const VARIANT_COLUMNS_SQL: &str = r"
ALTER TABLE products
    ADD COLUMN has_variants BOOLEAN NOT NULL DEFAULT FALSE,
    ADD COLUMN variant_type_en VARCHAR(100),
    ADD COLUMN variant_type_ro VARCHAR(100);
";

const PRODUCT_VARIANTS_SQL: &str = r"
CREATE TABLE product_variants (
    id SERIAL PRIMARY KEY,
    product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    value_en VARCHAR(100) NOT NULL,
    value_ro VARCHAR(100) NOT NULL,
    price NUMERIC(10,2) NOT NULL,
    stock_quantity INTEGER NOT NULL DEFAULT 0,
    sku VARCHAR(100),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ
);

CREATE INDEX ix_product_variants_product ON product_variants(product_id);
CREATE INDEX ix_product_variants_active ON product_variants(is_active);
";
