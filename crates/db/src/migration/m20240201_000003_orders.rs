//! Orders and order items, denormalized for checkout history.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ORDERS_SQL).await?;
        db.execute_unprepared(ORDER_ITEMS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS order_items, orders CASCADE;")
            .await?;
        Ok(())
    }
}

const ORDERS_SQL: &str = r"
CREATE TABLE orders (
    id VARCHAR PRIMARY KEY,
    order_number VARCHAR(50) NOT NULL,
    customer_email VARCHAR(255) NOT NULL,
    customer_name VARCHAR(200) NOT NULL,
    customer_phone VARCHAR(20),

    subtotal NUMERIC(10,2) NOT NULL,
    tax_amount NUMERIC(10,2) NOT NULL,
    total_amount NUMERIC(10,2) NOT NULL,
    currency VARCHAR(10) NOT NULL DEFAULT 'USD',

    payment_status VARCHAR(50) NOT NULL DEFAULT 'pending',
    payment_method VARCHAR(50) NOT NULL DEFAULT 'stripe',
    stripe_session_id VARCHAR(255),
    stripe_payment_intent_id VARCHAR(255),
    receipt_url VARCHAR(500),

    order_status VARCHAR(50) NOT NULL DEFAULT 'pending',

    shipping_address JSONB,
    billing_address JSONB,

    company_name VARCHAR(200),
    tax_id VARCHAR(100),
    trade_register_no VARCHAR(100),
    bank_name VARCHAR(200),
    iban VARCHAR(100),

    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ
);

CREATE UNIQUE INDEX ix_orders_order_number ON orders(order_number);
CREATE INDEX ix_orders_customer_email ON orders(customer_email);
CREATE INDEX ix_orders_payment_status ON orders(payment_status);
CREATE INDEX ix_orders_order_status ON orders(order_status);
";

const ORDER_ITEMS_SQL: &str = r"
CREATE TABLE order_items (
    id VARCHAR PRIMARY KEY,
    order_id VARCHAR NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    product_id INTEGER NOT NULL REFERENCES products(id),
    product_name VARCHAR(200) NOT NULL,
    product_slug VARCHAR(200) NOT NULL,

    variant_id INTEGER REFERENCES product_variants(id),
    variant_name VARCHAR(100),
    variant_value_en VARCHAR(100),
    variant_value_ro VARCHAR(100),

    unit_price NUMERIC(10,2) NOT NULL,
    quantity INTEGER NOT NULL,
    total_price NUMERIC(10,2) NOT NULL,

    product_image VARCHAR(500)
);

CREATE INDEX ix_order_items_order ON order_items(order_id);
";
