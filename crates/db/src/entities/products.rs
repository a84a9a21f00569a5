//! `SeaORM` Entity for the products table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name_en: String,
    pub name_ro: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description_en: Option<String>,
    pub description_ro: Option<String>,
    pub short_description_en: Option<String>,
    pub short_description_ro: Option<String>,
    /// Unit price. Decimal, never a float.
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub category_id: Option<i32>,
    pub brand: Option<String>,
    #[sea_orm(unique)]
    pub sku: Option<String>,
    pub stock_quantity: i32,
    pub is_active: bool,
    /// Image URL list.
    pub images: Option<Json>,
    pub has_variants: bool,
    pub variant_type_en: Option<String>,
    pub variant_type_ro: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
