//! Staff repository.

use sqlx::QueryBuilder;

use super::types::{NewStaff, Staff, StaffRole, StaffUpdate};
use super::{decode_list, encode_list};
use crate::db::DbPool;
use crate::{HotelError, Result};

const STAFF_COLUMNS: &str = "id, name, role, contact, assigned_tasks";

/// Repository for staff records.
pub struct StaffRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> StaffRepository<'a> {
    /// Create a new StaffRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a staff member.
    pub async fn create(&self, new_staff: &NewStaff) -> Result<Staff> {
        let role = new_staff
            .role
            .ok_or_else(|| HotelError::Validation("role is required".to_string()))?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO staff (name, role, contact, assigned_tasks) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_staff.name)
        .bind(role.as_str())
        .bind(&new_staff.contact)
        .bind(encode_list(&new_staff.assigned_tasks)?)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| HotelError::NotFound("staff".to_string()))
    }

    /// Get a staff member by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Staff>> {
        let sql = format!("SELECT {STAFF_COLUMNS} FROM staff WHERE id = ?");
        let row: Option<StaffRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(StaffRow::into_staff).transpose()
    }

    /// List all staff in insertion order.
    pub async fn list(&self) -> Result<Vec<Staff>> {
        let sql = format!("SELECT {STAFF_COLUMNS} FROM staff ORDER BY id");
        let rows: Vec<StaffRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;

        rows.into_iter().map(StaffRow::into_staff).collect()
    }

    /// Update a staff member by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated record, or None if not found.
    pub async fn update(&self, id: i64, update: &StaffUpdate) -> Result<Option<Staff>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE staff SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name.clone());
        }
        if let Some(role) = update.role {
            separated.push("role = ");
            separated.push_bind_unseparated(role.as_str());
        }
        if let Some(ref contact) = update.contact {
            separated.push("contact = ");
            separated.push_bind_unseparated(contact.clone());
        }
        if let Some(ref tasks) = update.assigned_tasks {
            separated.push("assigned_tasks = ");
            separated.push_bind_unseparated(encode_list(tasks)?);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a staff member. Returns false when no record matched.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM staff WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Internal struct for mapping database rows to Staff.
#[derive(sqlx::FromRow)]
struct StaffRow {
    id: i64,
    name: String,
    role: String,
    contact: Option<String>,
    assigned_tasks: String,
}

impl StaffRow {
    fn into_staff(self) -> Result<Staff> {
        Ok(Staff {
            id: self.id,
            name: self.name,
            role: self
                .role
                .parse::<StaffRole>()
                .map_err(HotelError::Database)?,
            contact: self.contact,
            assigned_tasks: decode_list(&self.assigned_tasks)?,
        })
    }
}
