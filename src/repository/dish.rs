use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Select, Set,
};
use tracing::{error, info};

use crate::db::ConnectionProvider;
use crate::entities::category;
use crate::entities::dish::{self, DishWithCategory, Entity as Dish};
use crate::error::DataError;

/// CRUD facade for dish rows. Reads join the category table so the caller
/// gets the category name for display; writes never touch it.
pub struct DishRepository {
    provider: Arc<ConnectionProvider>,
}

impl DishRepository {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        Self { provider }
    }

    fn with_category() -> Select<Dish> {
        Dish::find()
            .column_as(category::Column::Name, "category_name")
            .join(JoinType::InnerJoin, dish::Relation::Category.def())
    }

    /// Inserts the record and back-fills the generated id and creation
    /// timestamp. The category must already exist; the store's foreign key
    /// rejects the insert otherwise.
    pub async fn create(&self, record: &mut dish::Model) -> Result<(), DataError> {
        let db = self.provider.acquire().await?;
        let created = Utc::now();
        let row = dish::ActiveModel {
            category_id: Set(record.category_id),
            name: Set(record.name.clone()),
            description: Set(record.description.clone()),
            price: Set(record.price),
            preparation_time: Set(record.preparation_time),
            available: Set(record.available),
            vegetarian: Set(record.vegetarian),
            spicy: Set(record.spicy),
            created_at: Set(created),
            ..Default::default()
        };

        match Dish::insert(row).exec(&db).await {
            Ok(res) => {
                record.dish_id = res.last_insert_id;
                record.created_at = created;
                info!(id = record.dish_id, name = %record.name, "dish created");
                Ok(())
            }
            Err(err) => {
                error!(%err, "failed to create dish");
                Err(err.into())
            }
        }
    }

    /// Available dishes joined with their category, ordered by category name
    /// and then dish name.
    pub async fn read_all(&self) -> Result<Vec<DishWithCategory>, DataError> {
        let db = self.provider.acquire().await?;
        Self::with_category()
            .filter(dish::Column::Available.eq(true))
            .order_by_asc(category::Column::Name)
            .order_by_asc(dish::Column::Name)
            .into_model::<DishWithCategory>()
            .all(&db)
            .await
            .map_err(|err| {
                error!(%err, "failed to list dishes");
                DataError::from(err)
            })
    }

    /// Finds by id regardless of availability, still joined for the category
    /// name.
    pub async fn read_by_id(&self, dish_id: i32) -> Result<Option<DishWithCategory>, DataError> {
        let db = self.provider.acquire().await?;
        Self::with_category()
            .filter(dish::Column::DishId.eq(dish_id))
            .into_model::<DishWithCategory>()
            .one(&db)
            .await
            .map_err(|err| {
                error!(%err, dish_id, "failed to read dish");
                DataError::from(err)
            })
    }

    /// Available dishes of one category, ordered by name.
    pub async fn read_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<DishWithCategory>, DataError> {
        let db = self.provider.acquire().await?;
        Self::with_category()
            .filter(dish::Column::CategoryId.eq(category_id))
            .filter(dish::Column::Available.eq(true))
            .order_by_asc(dish::Column::Name)
            .into_model::<DishWithCategory>()
            .all(&db)
            .await
            .map_err(|err| {
                error!(%err, category_id, "failed to list dishes for category");
                DataError::from(err)
            })
    }

    /// Overwrites every mutable field by id, including the category. The
    /// creation timestamp stays as written at insert time.
    pub async fn update(&self, record: &dish::Model) -> Result<(), DataError> {
        let db = self.provider.acquire().await?;
        let result = Dish::update_many()
            .col_expr(dish::Column::CategoryId, Expr::value(record.category_id))
            .col_expr(dish::Column::Name, Expr::value(record.name.clone()))
            .col_expr(
                dish::Column::Description,
                Expr::value(record.description.clone()),
            )
            .col_expr(dish::Column::Price, Expr::value(record.price))
            .col_expr(
                dish::Column::PreparationTime,
                Expr::value(record.preparation_time),
            )
            .col_expr(dish::Column::Available, Expr::value(record.available))
            .col_expr(dish::Column::Vegetarian, Expr::value(record.vegetarian))
            .col_expr(dish::Column::Spicy, Expr::value(record.spicy))
            .filter(dish::Column::DishId.eq(record.dish_id))
            .exec(&db)
            .await
            .map_err(|err| {
                error!(%err, "failed to update dish");
                DataError::from(err)
            })?;

        if result.rows_affected == 1 {
            info!(id = record.dish_id, "dish updated");
            Ok(())
        } else {
            Err(DataError::NotFound)
        }
    }

    /// Soft delete: marks the dish unavailable, the row stays.
    pub async fn delete(&self, dish_id: i32) -> Result<(), DataError> {
        let db = self.provider.acquire().await?;
        let result = Dish::update_many()
            .col_expr(dish::Column::Available, Expr::value(false))
            .filter(dish::Column::DishId.eq(dish_id))
            .exec(&db)
            .await
            .map_err(|err| {
                error!(%err, dish_id, "failed to mark dish unavailable");
                DataError::from(err)
            })?;

        if result.rows_affected == 1 {
            info!(id = dish_id, "dish marked unavailable");
            Ok(())
        } else {
            Err(DataError::NotFound)
        }
    }

    /// Substring match on the dish name among available dishes, wildcard on
    /// both sides.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<DishWithCategory>, DataError> {
        let db = self.provider.acquire().await?;
        Self::with_category()
            .filter(dish::Column::Name.contains(name))
            .filter(dish::Column::Available.eq(true))
            .order_by_asc(dish::Column::Name)
            .into_model::<DishWithCategory>()
            .all(&db)
            .await
            .map_err(|err| {
                error!(%err, "failed to search dishes");
                DataError::from(err)
            })
    }
}
