use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{error, info};

use crate::db::ConnectionProvider;
use crate::entities::customer::{self, Entity as Customer};
use crate::error::DataError;

/// CRUD facade for customer rows. Stateless; every call goes through the
/// shared connection provider.
pub struct CustomerRepository {
    provider: Arc<ConnectionProvider>,
}

impl CustomerRepository {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        Self { provider }
    }

    /// Inserts the record and back-fills the generated id and registration
    /// timestamp. The delivery address has no column and is not written.
    pub async fn create(&self, record: &mut customer::Model) -> Result<(), DataError> {
        let db = self.provider.acquire().await?;
        let registered = Utc::now();
        let row = customer::ActiveModel {
            full_name: Set(record.full_name.clone()),
            email: Set(record.email.clone()),
            phone: Set(record.phone.clone()),
            registration_date: Set(registered),
            active: Set(record.active),
            ..Default::default()
        };

        match Customer::insert(row).exec(&db).await {
            Ok(res) => {
                record.customer_id = res.last_insert_id;
                record.registration_date = registered;
                info!(id = record.customer_id, name = %record.full_name, "customer created");
                Ok(())
            }
            Err(err) => {
                error!(%err, "failed to create customer");
                Err(err.into())
            }
        }
    }

    /// Every customer, active or not, ordered by name.
    pub async fn read_all(&self) -> Result<Vec<customer::Model>, DataError> {
        let db = self.provider.acquire().await?;
        Customer::find()
            .order_by_asc(customer::Column::FullName)
            .all(&db)
            .await
            .map_err(|err| {
                error!(%err, "failed to list customers");
                DataError::from(err)
            })
    }

    pub async fn read_by_id(&self, customer_id: i32) -> Result<Option<customer::Model>, DataError> {
        let db = self.provider.acquire().await?;
        Customer::find_by_id(customer_id)
            .one(&db)
            .await
            .map_err(|err| {
                error!(%err, customer_id, "failed to read customer");
                DataError::from(err)
            })
    }

    /// Overwrites every mutable field by id. The registration timestamp stays
    /// as written at insert time.
    pub async fn update(&self, record: &customer::Model) -> Result<(), DataError> {
        let db = self.provider.acquire().await?;
        let result = Customer::update_many()
            .col_expr(
                customer::Column::FullName,
                Expr::value(record.full_name.clone()),
            )
            .col_expr(customer::Column::Email, Expr::value(record.email.clone()))
            .col_expr(customer::Column::Phone, Expr::value(record.phone.clone()))
            .col_expr(customer::Column::Active, Expr::value(record.active))
            .filter(customer::Column::CustomerId.eq(record.customer_id))
            .exec(&db)
            .await
            .map_err(|err| {
                error!(%err, "failed to update customer");
                DataError::from(err)
            })?;

        if result.rows_affected == 1 {
            info!(id = record.customer_id, "customer updated");
            Ok(())
        } else {
            Err(DataError::NotFound)
        }
    }

    /// Hard delete. Customers are the one entity whose rows are physically
    /// removed; categories and dishes are only flagged.
    pub async fn delete(&self, customer_id: i32) -> Result<(), DataError> {
        let db = self.provider.acquire().await?;
        let result = Customer::delete_by_id(customer_id)
            .exec(&db)
            .await
            .map_err(|err| {
                error!(%err, customer_id, "failed to delete customer");
                DataError::from(err)
            })?;

        if result.rows_affected == 1 {
            info!(id = customer_id, "customer deleted");
            Ok(())
        } else {
            Err(DataError::NotFound)
        }
    }

    /// Substring match on the full name, wildcard on both sides, so the empty
    /// string matches every row.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<customer::Model>, DataError> {
        let db = self.provider.acquire().await?;
        Customer::find()
            .filter(customer::Column::FullName.contains(name))
            .order_by_asc(customer::Column::FullName)
            .all(&db)
            .await
            .map_err(|err| {
                error!(%err, "failed to search customers");
                DataError::from(err)
            })
    }
}
