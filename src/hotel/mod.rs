//! Hotel records for hotelier.
//!
//! Clients, rooms, services, staff and transfers. Each record type has its
//! own table and repository; list-valued references are stored as JSON
//! arrays of ids.

mod client;
mod room;
mod service;
mod staff;
mod transfer;
mod types;

pub use client::ClientRepository;
pub use room::RoomRepository;
pub use service::ServiceRepository;
pub use staff::StaffRepository;
pub use transfer::TransferRepository;
pub use types::{
    Client, ClientDetails, ClientUpdate, NewClient, NewRoom, NewService, NewStaff, NewTransfer,
    Room, RoomStatus, RoomType, RoomUpdate, Service, ServiceUpdate, Staff, StaffRole, StaffUpdate,
    Transfer, TransferUpdate,
};

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::QueryBuilder;

use crate::db::DbPool;
use crate::{HotelError, Result};

/// Encode a list column as JSON text.
fn encode_list<T: Serialize>(items: &[T]) -> Result<String> {
    serde_json::to_string(items).map_err(|e| HotelError::Validation(e.to_string()))
}

/// Decode a JSON list column.
fn decode_list<T: DeserializeOwned>(raw: &str) -> sqlx::Result<Vec<T>> {
    serde_json::from_str(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

/// Check that every id in `ids` names an existing row of `table`.
///
/// Scalar references are covered by foreign keys; this covers the ids kept
/// in JSON list columns.
async fn ensure_exist(pool: &DbPool, table: &str, field: &str, ids: &[i64]) -> Result<()> {
    let unique: BTreeSet<i64> = ids.iter().copied().collect();
    if unique.is_empty() {
        return Ok(());
    }

    let mut query: QueryBuilder<sqlx::Sqlite> =
        QueryBuilder::new(format!("SELECT COUNT(*) FROM {table} WHERE id IN ("));
    let mut separated = query.separated(", ");
    for id in &unique {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let found: i64 = query.build_query_scalar().fetch_one(pool).await?;
    if found as usize != unique.len() {
        return Err(HotelError::Validation(format!(
            "{field} references a record that does not exist"
        )));
    }
    Ok(())
}

/// Arrange fetched rows to follow `ids`, one entry per id.
///
/// Repeated ids repeat the row; ids without a row are dropped.
fn in_id_order<T: Clone>(ids: &[i64], rows: Vec<T>, id_of: impl Fn(&T) -> i64) -> Vec<T> {
    ids.iter()
        .filter_map(|id| rows.iter().find(|row| id_of(row) == *id).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[test]
    fn test_list_roundtrip() {
        let raw = encode_list(&[3_i64, 1, 2]).unwrap();
        assert_eq!(raw, "[3,1,2]");
        let ids: Vec<i64> = decode_list(&raw).unwrap();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_decode_list_invalid() {
        assert!(decode_list::<i64>("not json").is_err());
    }

    #[test]
    fn test_in_id_order() {
        let rows = vec![1_i64, 2, 3];
        assert_eq!(in_id_order(&[3, 9, 1], rows, |r| *r), vec![3, 1]);
    }

    #[test]
    fn test_in_id_order_repeats_duplicates() {
        let rows = vec![1_i64, 2];
        assert_eq!(in_id_order(&[1, 2, 1], rows, |r| *r), vec![1, 2, 1]);
    }

    #[tokio::test]
    async fn test_ensure_exist() {
        let db = Database::open_in_memory().await.unwrap();
        sqlx::query("INSERT INTO staff (name, role) VALUES ('Ann', 'Manager')")
            .execute(db.pool())
            .await
            .unwrap();

        assert!(ensure_exist(db.pool(), "staff", "staff", &[]).await.is_ok());
        assert!(ensure_exist(db.pool(), "staff", "staff", &[1, 1]).await.is_ok());

        let result = ensure_exist(db.pool(), "staff", "staff", &[1, 2]).await;
        assert!(matches!(result, Err(HotelError::Validation(_))));
    }
}
