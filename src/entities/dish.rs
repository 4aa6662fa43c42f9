use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;
use serde::Serialize;

use super::category::Entity as Category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "dish")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub dish_id: i32,
    pub category_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub preparation_time: i32,
    pub available: bool,
    pub vegetarian: bool,
    pub spicy: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Category",
        from = "Column::CategoryId",
        to = "super::category::Column::CategoryId"
    )]
    Category,
}

impl Related<Category> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Read-only projection of a dish joined with its category, used wherever the
/// caller needs the category name for display. Never written back.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize)]
pub struct DishWithCategory {
    pub dish_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub preparation_time: i32,
    pub available: bool,
    pub vegetarian: bool,
    pub spicy: bool,
    pub created_at: DateTimeUtc,
    pub category_name: String,
}
