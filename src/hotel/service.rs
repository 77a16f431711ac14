//! Service repository.

use sqlx::QueryBuilder;

use super::in_id_order;
use super::types::{NewService, Service, ServiceUpdate};
use crate::db::DbPool;
use crate::{HotelError, Result};

const SERVICE_COLUMNS: &str = "id, name, description, price, provided_by";

/// Repository for billable services.
pub struct ServiceRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ServiceRepository<'a> {
    /// Create a new ServiceRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a service.
    ///
    /// A `provided_by` that names no staff member fails with
    /// [`HotelError::Validation`].
    pub async fn create(&self, new_service: &NewService) -> Result<Service> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO services (name, description, price, provided_by)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_service.name)
        .bind(&new_service.description)
        .bind(new_service.price)
        .bind(new_service.provided_by)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| HotelError::NotFound("service".to_string()))
    }

    /// Get a service by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Service>> {
        let sql = format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id = ?");
        let row: Option<ServiceRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(ServiceRow::into_service))
    }

    /// Get the services named by `ids`, in that order. Unknown ids are skipped.
    pub async fn get_many(&self, ids: &[i64]) -> Result<Vec<Service>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new(format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id IN ("));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows: Vec<ServiceRow> = query.build_query_as().fetch_all(self.pool).await?;
        let services = rows.into_iter().map(ServiceRow::into_service).collect();

        Ok(in_id_order(ids, services, |s: &Service| s.id))
    }

    /// List all services in insertion order.
    pub async fn list(&self) -> Result<Vec<Service>> {
        let sql = format!("SELECT {SERVICE_COLUMNS} FROM services ORDER BY id");
        let rows: Vec<ServiceRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;

        Ok(rows.into_iter().map(ServiceRow::into_service).collect())
    }

    /// Update a service by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated record, or None if not found.
    pub async fn update(&self, id: i64, update: &ServiceUpdate) -> Result<Option<Service>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE services SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name.clone());
        }
        if let Some(ref description) = update.description {
            separated.push("description = ");
            separated.push_bind_unseparated(description.clone());
        }
        if let Some(price) = update.price {
            separated.push("price = ");
            separated.push_bind_unseparated(price);
        }
        if let Some(provided_by) = update.provided_by {
            separated.push("provided_by = ");
            separated.push_bind_unseparated(provided_by);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a service. Returns false when no record matched.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Internal struct for mapping database rows to Service.
#[derive(sqlx::FromRow)]
struct ServiceRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: Option<f64>,
    provided_by: Option<i64>,
}

impl ServiceRow {
    fn into_service(self) -> Service {
        Service {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            provided_by: self.provided_by,
        }
    }
}
