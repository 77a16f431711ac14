//! Room repository.

use sqlx::QueryBuilder;

use super::types::{NewRoom, Room, RoomStatus, RoomType, RoomUpdate};
use super::{decode_list, encode_list};
use crate::db::DbPool;
use crate::{HotelError, Result};

const ROOM_COLUMNS: &str =
    "id, room_number, room_type, price_per_night, status, assets, current_client_id";

/// Repository for rooms.
pub struct RoomRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> RoomRepository<'a> {
    /// Create a new RoomRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a room.
    pub async fn create(&self, new_room: &NewRoom) -> Result<Room> {
        let room_type = new_room
            .room_type
            .ok_or_else(|| HotelError::Validation("type is required".to_string()))?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO rooms (room_number, room_type, price_per_night, status, assets, current_client_id)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_room.room_number)
        .bind(room_type.as_str())
        .bind(new_room.price_per_night)
        .bind(new_room.status.as_str())
        .bind(encode_list(&new_room.assets)?)
        .bind(new_room.current_client)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| HotelError::NotFound("room".to_string()))
    }

    /// Get a room by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Room>> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?");
        let row: Option<RoomRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(RoomRow::into_room).transpose()
    }

    /// List all rooms in insertion order.
    pub async fn list(&self) -> Result<Vec<Room>> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms ORDER BY id");
        let rows: Vec<RoomRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;

        rows.into_iter().map(RoomRow::into_room).collect()
    }

    /// Update a room by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated record, or None if not found.
    pub async fn update(&self, id: i64, update: &RoomUpdate) -> Result<Option<Room>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE rooms SET ");
        let mut separated = query.separated(", ");

        if let Some(ref room_number) = update.room_number {
            separated.push("room_number = ");
            separated.push_bind_unseparated(room_number.clone());
        }
        if let Some(room_type) = update.room_type {
            separated.push("room_type = ");
            separated.push_bind_unseparated(room_type.as_str());
        }
        if let Some(price) = update.price_per_night {
            separated.push("price_per_night = ");
            separated.push_bind_unseparated(price);
        }
        if let Some(status) = update.status {
            separated.push("status = ");
            separated.push_bind_unseparated(status.as_str());
        }
        if let Some(ref assets) = update.assets {
            separated.push("assets = ");
            separated.push_bind_unseparated(encode_list(assets)?);
        }
        if let Some(client) = update.current_client {
            separated.push("current_client_id = ");
            separated.push_bind_unseparated(client);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a room. Returns false when no record matched.
    ///
    /// Clients assigned to the room lose the assignment.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Internal struct for mapping database rows to Room.
#[derive(sqlx::FromRow)]
struct RoomRow {
    id: i64,
    room_number: String,
    room_type: String,
    price_per_night: Option<f64>,
    status: String,
    assets: String,
    current_client_id: Option<i64>,
}

impl RoomRow {
    fn into_room(self) -> Result<Room> {
        Ok(Room {
            id: self.id,
            room_number: self.room_number,
            room_type: self
                .room_type
                .parse::<RoomType>()
                .map_err(HotelError::Database)?,
            price_per_night: self.price_per_night,
            status: self
                .status
                .parse::<RoomStatus>()
                .map_err(HotelError::Database)?,
            assets: decode_list(&self.assets)?,
            current_client: self.current_client_id,
        })
    }
}
