use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{error, info};

use crate::db::ConnectionProvider;
use crate::entities::category::{self, Entity as Category};
use crate::error::DataError;

/// CRUD facade for category rows. Categories are never removed, only flagged
/// inactive.
pub struct CategoryRepository {
    provider: Arc<ConnectionProvider>,
}

impl CategoryRepository {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        Self { provider }
    }

    /// Inserts the record and back-fills the generated id and creation
    /// timestamp.
    pub async fn create(&self, record: &mut category::Model) -> Result<(), DataError> {
        let db = self.provider.acquire().await?;
        let created = Utc::now();
        let row = category::ActiveModel {
            name: Set(record.name.clone()),
            description: Set(record.description.clone()),
            active: Set(record.active),
            created_at: Set(created),
            ..Default::default()
        };

        match Category::insert(row).exec(&db).await {
            Ok(res) => {
                record.category_id = res.last_insert_id;
                record.created_at = created;
                info!(id = record.category_id, name = %record.name, "category created");
                Ok(())
            }
            Err(err) => {
                error!(%err, "failed to create category");
                Err(err.into())
            }
        }
    }

    /// Active categories only, ordered by name. Soft-deleted rows never show
    /// up here.
    pub async fn read_all(&self) -> Result<Vec<category::Model>, DataError> {
        let db = self.provider.acquire().await?;
        Category::find()
            .filter(category::Column::Active.eq(true))
            .order_by_asc(category::Column::Name)
            .all(&db)
            .await
            .map_err(|err| {
                error!(%err, "failed to list categories");
                DataError::from(err)
            })
    }

    /// Finds by id regardless of the active flag.
    pub async fn read_by_id(&self, category_id: i32) -> Result<Option<category::Model>, DataError> {
        let db = self.provider.acquire().await?;
        Category::find_by_id(category_id)
            .one(&db)
            .await
            .map_err(|err| {
                error!(%err, category_id, "failed to read category");
                DataError::from(err)
            })
    }

    pub async fn update(&self, record: &category::Model) -> Result<(), DataError> {
        let db = self.provider.acquire().await?;
        let result = Category::update_many()
            .col_expr(category::Column::Name, Expr::value(record.name.clone()))
            .col_expr(
                category::Column::Description,
                Expr::value(record.description.clone()),
            )
            .col_expr(category::Column::Active, Expr::value(record.active))
            .filter(category::Column::CategoryId.eq(record.category_id))
            .exec(&db)
            .await
            .map_err(|err| {
                error!(%err, "failed to update category");
                DataError::from(err)
            })?;

        if result.rows_affected == 1 {
            info!(id = record.category_id, "category updated");
            Ok(())
        } else {
            Err(DataError::NotFound)
        }
    }

    /// Soft delete: flips the active flag, the row stays.
    pub async fn delete(&self, category_id: i32) -> Result<(), DataError> {
        let db = self.provider.acquire().await?;
        let result = Category::update_many()
            .col_expr(category::Column::Active, Expr::value(false))
            .filter(category::Column::CategoryId.eq(category_id))
            .exec(&db)
            .await
            .map_err(|err| {
                error!(%err, category_id, "failed to deactivate category");
                DataError::from(err)
            })?;

        if result.rows_affected == 1 {
            info!(id = category_id, "category deactivated");
            Ok(())
        } else {
            Err(DataError::NotFound)
        }
    }
}
