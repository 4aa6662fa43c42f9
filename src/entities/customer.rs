use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub customer_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Collected by the form but the schema has no column for it, so it
    /// always reads back as `None`.
    #[sea_orm(ignore)]
    pub delivery_address: Option<String>,
    pub registration_date: DateTimeUtc,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
