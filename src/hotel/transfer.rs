//! Transfer repository.

use chrono::{DateTime, Utc};
use sqlx::QueryBuilder;

use super::in_id_order;
use super::types::{NewTransfer, Transfer, TransferUpdate};
use crate::db::DbPool;
use crate::{HotelError, Result};

const TRANSFER_COLUMNS: &str = "id, client_id, from_location, to_location, date, staff_id";

/// Repository for guest transfers.
pub struct TransferRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> TransferRepository<'a> {
    /// Create a new TransferRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a transfer.
    pub async fn create(&self, new_transfer: &NewTransfer) -> Result<Transfer> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO transfers (client_id, from_location, to_location, date, staff_id)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(new_transfer.client)
        .bind(&new_transfer.from_location)
        .bind(&new_transfer.to_location)
        .bind(new_transfer.date)
        .bind(new_transfer.staff)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| HotelError::NotFound("transfer".to_string()))
    }

    /// Get a transfer by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Transfer>> {
        let sql = format!("SELECT {TRANSFER_COLUMNS} FROM transfers WHERE id = ?");
        let row: Option<TransferRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(TransferRow::into_transfer))
    }

    /// Get the transfers named by `ids`, in that order. Unknown ids are skipped.
    pub async fn get_many(&self, ids: &[i64]) -> Result<Vec<Transfer>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new(format!("SELECT {TRANSFER_COLUMNS} FROM transfers WHERE id IN ("));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows: Vec<TransferRow> = query.build_query_as().fetch_all(self.pool).await?;
        let transfers = rows.into_iter().map(TransferRow::into_transfer).collect();

        Ok(in_id_order(ids, transfers, |t: &Transfer| t.id))
    }

    /// List all transfers in insertion order.
    pub async fn list(&self) -> Result<Vec<Transfer>> {
        let sql = format!("SELECT {TRANSFER_COLUMNS} FROM transfers ORDER BY id");
        let rows: Vec<TransferRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;

        Ok(rows.into_iter().map(TransferRow::into_transfer).collect())
    }

    /// Update a transfer by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated record, or None if not found.
    pub async fn update(&self, id: i64, update: &TransferUpdate) -> Result<Option<Transfer>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE transfers SET ");
        let mut separated = query.separated(", ");

        if let Some(client) = update.client {
            separated.push("client_id = ");
            separated.push_bind_unseparated(client);
        }
        if let Some(ref from) = update.from_location {
            separated.push("from_location = ");
            separated.push_bind_unseparated(from.clone());
        }
        if let Some(ref to) = update.to_location {
            separated.push("to_location = ");
            separated.push_bind_unseparated(to.clone());
        }
        if let Some(date) = update.date {
            separated.push("date = ");
            separated.push_bind_unseparated(date);
        }
        if let Some(staff) = update.staff {
            separated.push("staff_id = ");
            separated.push_bind_unseparated(staff);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a transfer. Returns false when no record matched.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transfers WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Internal struct for mapping database rows to Transfer.
#[derive(sqlx::FromRow)]
struct TransferRow {
    id: i64,
    client_id: Option<i64>,
    from_location: Option<String>,
    to_location: Option<String>,
    date: Option<DateTime<Utc>>,
    staff_id: Option<i64>,
}

impl TransferRow {
    fn into_transfer(self) -> Transfer {
        Transfer {
            id: self.id,
            client: self.client_id,
            from_location: self.from_location,
            to_location: self.to_location,
            date: self.date,
            staff: self.staff_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotel::{NewStaff, StaffRepository, StaffRole};
    use crate::Database;
    use chrono::TimeZone;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn airport_run() -> NewTransfer {
        NewTransfer {
            from_location: Some("Airport".to_string()),
            to_location: Some("Hotel".to_string()),
            date: Some(Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_transfer() {
        let db = setup_db().await;
        let repo = TransferRepository::new(db.pool());

        let transfer = repo.create(&airport_run()).await.unwrap();

        assert_eq!(transfer.from_location.as_deref(), Some("Airport"));
        assert_eq!(
            transfer.date,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap())
        );
        assert!(transfer.client.is_none());
    }

    #[tokio::test]
    async fn test_create_empty_transfer() {
        let db = setup_db().await;
        let repo = TransferRepository::new(db.pool());

        let transfer = repo.create(&NewTransfer::default()).await.unwrap();
        assert!(transfer.date.is_none());
        assert!(transfer.staff.is_none());
    }

    #[tokio::test]
    async fn test_create_transfer_with_missing_client() {
        let db = setup_db().await;
        let repo = TransferRepository::new(db.pool());

        let mut new_transfer = airport_run();
        new_transfer.client = Some(5);
        let result = repo.create(&new_transfer).await;

        assert!(matches!(result, Err(HotelError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_transfer_assigns_staff() {
        let db = setup_db().await;
        let staff = StaffRepository::new(db.pool())
            .create(&NewStaff::new("Dan", StaffRole::Receptionist))
            .await
            .unwrap();
        let repo = TransferRepository::new(db.pool());

        let transfer = repo.create(&airport_run()).await.unwrap();
        let update = TransferUpdate {
            staff: Some(Some(staff.id)),
            to_location: Some(None),
            ..Default::default()
        };
        let updated = repo.update(transfer.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.staff, Some(staff.id));
        assert!(updated.to_location.is_none());
        assert_eq!(updated.from_location.as_deref(), Some("Airport"));
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let db = setup_db().await;
        let repo = TransferRepository::new(db.pool());

        let first = repo.create(&airport_run()).await.unwrap();
        repo.create(&NewTransfer::default()).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);

        assert!(repo.delete(first.id).await.unwrap());
        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_ne!(remaining[0].id, first.id);
    }
}
