pub mod category;
pub mod customer;
pub mod dish;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::entities::{
    category::Entity as Category, customer::Entity as Customer, dish::Entity as Dish,
};

pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());
    let create_customer_table = schema.create_table_from_entity(Customer);
    let create_category_table = schema.create_table_from_entity(Category);
    let create_dish_table = schema.create_table_from_entity(Dish);

    db.execute(db.get_database_backend().build(&create_customer_table))
        .await?;
    // category before dish, the dish table carries the foreign key
    db.execute(db.get_database_backend().build(&create_category_table))
        .await?;
    db.execute(db.get_database_backend().build(&create_dish_table))
        .await?;
    Ok(())
}
