//! Client repository.
//!
//! Reads come in two shapes: the stored record with reference ids, and
//! [`ClientDetails`] with the room, services and transfers resolved.

use chrono::NaiveDate;
use sqlx::QueryBuilder;

use super::types::{Client, ClientDetails, ClientUpdate, NewClient};
use super::{
    decode_list, encode_list, ensure_exist, RoomRepository, ServiceRepository, TransferRepository,
};
use crate::db::DbPool;
use crate::{HotelError, Result};

const CLIENT_COLUMNS: &str = "id, name, email, phone, address, check_in_date, check_out_date, \
     room_id, services_used, transfers";

/// Repository for hotel clients.
pub struct ClientRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ClientRepository<'a> {
    /// Create a new ClientRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a client.
    ///
    /// Every referenced room, service and transfer must exist.
    pub async fn create(&self, new_client: &NewClient) -> Result<Client> {
        ensure_exist(self.pool, "services", "servicesUsed", &new_client.services_used).await?;
        ensure_exist(self.pool, "transfers", "transfers", &new_client.transfers).await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO clients (name, email, phone, address, check_in_date, check_out_date,
                                  room_id, services_used, transfers)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_client.name)
        .bind(&new_client.email)
        .bind(&new_client.phone)
        .bind(&new_client.address)
        .bind(new_client.check_in_date)
        .bind(new_client.check_out_date)
        .bind(new_client.room)
        .bind(encode_list(&new_client.services_used)?)
        .bind(encode_list(&new_client.transfers)?)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| HotelError::NotFound("client".to_string()))
    }

    /// Get a client by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?");
        let row: Option<ClientRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(ClientRow::into_client).transpose()
    }

    /// List all clients in insertion order.
    pub async fn list(&self) -> Result<Vec<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY id");
        let rows: Vec<ClientRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;

        rows.into_iter().map(ClientRow::into_client).collect()
    }

    /// Get a client with its references resolved.
    pub async fn get_details(&self, id: i64) -> Result<Option<ClientDetails>> {
        match self.get_by_id(id).await? {
            Some(client) => Ok(Some(self.populate(client).await?)),
            None => Ok(None),
        }
    }

    /// List all clients with their references resolved.
    pub async fn list_details(&self) -> Result<Vec<ClientDetails>> {
        let clients = self.list().await?;
        let mut details = Vec::with_capacity(clients.len());
        for client in clients {
            details.push(self.populate(client).await?);
        }
        Ok(details)
    }

    /// Resolve the room, services and transfers of a client.
    ///
    /// Ids whose records have since been deleted are dropped.
    async fn populate(&self, client: Client) -> Result<ClientDetails> {
        let room = match client.room {
            Some(room_id) => RoomRepository::new(self.pool).get_by_id(room_id).await?,
            None => None,
        };
        let services_used = ServiceRepository::new(self.pool)
            .get_many(&client.services_used)
            .await?;
        let transfers = TransferRepository::new(self.pool)
            .get_many(&client.transfers)
            .await?;

        Ok(ClientDetails {
            id: client.id,
            name: client.name,
            email: client.email,
            phone: client.phone,
            address: client.address,
            check_in_date: client.check_in_date,
            check_out_date: client.check_out_date,
            room,
            services_used,
            transfers,
        })
    }

    /// Update a client by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated record, or None if not found.
    pub async fn update(&self, id: i64, update: &ClientUpdate) -> Result<Option<Client>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        if let Some(ref services) = update.services_used {
            ensure_exist(self.pool, "services", "servicesUsed", services).await?;
        }
        if let Some(ref transfers) = update.transfers {
            ensure_exist(self.pool, "transfers", "transfers", transfers).await?;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE clients SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name.clone());
        }
        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(email.clone());
        }
        if let Some(ref phone) = update.phone {
            separated.push("phone = ");
            separated.push_bind_unseparated(phone.clone());
        }
        if let Some(ref address) = update.address {
            separated.push("address = ");
            separated.push_bind_unseparated(address.clone());
        }
        if let Some(date) = update.check_in_date {
            separated.push("check_in_date = ");
            separated.push_bind_unseparated(date);
        }
        if let Some(date) = update.check_out_date {
            separated.push("check_out_date = ");
            separated.push_bind_unseparated(date);
        }
        if let Some(room) = update.room {
            separated.push("room_id = ");
            separated.push_bind_unseparated(room);
        }
        if let Some(ref services) = update.services_used {
            separated.push("services_used = ");
            separated.push_bind_unseparated(encode_list(services)?);
        }
        if let Some(ref transfers) = update.transfers {
            separated.push("transfers = ");
            separated.push_bind_unseparated(encode_list(transfers)?);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a client. Returns false when no record matched.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Internal struct for mapping database rows to Client.
#[derive(sqlx::FromRow)]
struct ClientRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    address: Option<String>,
    check_in_date: Option<NaiveDate>,
    check_out_date: Option<NaiveDate>,
    room_id: Option<i64>,
    services_used: String,
    transfers: String,
}

impl ClientRow {
    fn into_client(self) -> Result<Client> {
        Ok(Client {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            room: self.room_id,
            services_used: decode_list(&self.services_used)?,
            transfers: decode_list(&self.transfers)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotel::{NewRoom, NewService, NewTransfer, RoomType};
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn bob() -> NewClient {
        NewClient::new("Bob", "bob@example.com", "555-0101")
    }

    #[tokio::test]
    async fn test_create_client() {
        let db = setup_db().await;
        let repo = ClientRepository::new(db.pool());

        let mut new_client = bob();
        new_client.check_in_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        let client = repo.create(&new_client).await.unwrap();

        assert_eq!(client.name, "Bob");
        assert_eq!(client.check_in_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(client.room.is_none());
        assert!(client.services_used.is_empty());
    }

    #[tokio::test]
    async fn test_create_client_with_missing_references() {
        let db = setup_db().await;
        let repo = ClientRepository::new(db.pool());

        let mut new_client = bob();
        new_client.services_used = vec![3];
        let result = repo.create(&new_client).await;
        assert!(matches!(result, Err(HotelError::Validation(_))));

        let mut new_client = bob();
        new_client.room = Some(3);
        let result = repo.create(&new_client).await;
        assert!(matches!(result, Err(HotelError::Validation(_))));

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_details_populates_references() {
        let db = setup_db().await;
        let room = RoomRepository::new(db.pool())
            .create(&NewRoom::new("101", RoomType::Single))
            .await
            .unwrap();
        let service = ServiceRepository::new(db.pool())
            .create(&NewService {
                name: "Breakfast".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let transfer = TransferRepository::new(db.pool())
            .create(&NewTransfer {
                from_location: Some("Airport".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let repo = ClientRepository::new(db.pool());

        let mut new_client = bob();
        new_client.room = Some(room.id);
        new_client.services_used = vec![service.id];
        new_client.transfers = vec![transfer.id];
        let client = repo.create(&new_client).await.unwrap();

        let details = repo.get_details(client.id).await.unwrap().unwrap();
        assert_eq!(details.room.as_ref().map(|r| r.id), Some(room.id));
        assert_eq!(details.services_used[0].name, "Breakfast");
        assert_eq!(details.transfers[0].from_location.as_deref(), Some("Airport"));

        let all = repo.list_details().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(repo.get_details(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_details_repeats_duplicate_services() {
        let db = setup_db().await;
        let service = ServiceRepository::new(db.pool())
            .create(&NewService {
                name: "Minibar".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let repo = ClientRepository::new(db.pool());

        let mut new_client = bob();
        new_client.services_used = vec![service.id, service.id];
        let client = repo.create(&new_client).await.unwrap();
        assert_eq!(client.services_used, vec![service.id, service.id]);

        let details = repo.get_details(client.id).await.unwrap().unwrap();
        let names: Vec<_> = details.services_used.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Minibar", "Minibar"]);
    }

    #[tokio::test]
    async fn test_deleted_references_drop_out() {
        let db = setup_db().await;
        let rooms = RoomRepository::new(db.pool());
        let services = ServiceRepository::new(db.pool());
        let room = rooms
            .create(&NewRoom::new("101", RoomType::Single))
            .await
            .unwrap();
        let service = services
            .create(&NewService {
                name: "Spa".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let repo = ClientRepository::new(db.pool());

        let mut new_client = bob();
        new_client.room = Some(room.id);
        new_client.services_used = vec![service.id];
        let client = repo.create(&new_client).await.unwrap();

        rooms.delete(room.id).await.unwrap();
        services.delete(service.id).await.unwrap();

        let details = repo.get_details(client.id).await.unwrap().unwrap();
        assert!(details.room.is_none());
        assert!(details.services_used.is_empty());
    }

    #[tokio::test]
    async fn test_update_client_partial() {
        let db = setup_db().await;
        let repo = ClientRepository::new(db.pool());

        let client = repo.create(&bob()).await.unwrap();
        let update = ClientUpdate {
            phone: Some("555-0199".to_string()),
            address: Some(Some("1 Harbour Rd".to_string())),
            ..Default::default()
        };
        let updated = repo.update(client.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.name, "Bob");
        assert_eq!(updated.email, "bob@example.com");
        assert_eq!(updated.phone, "555-0199");
        assert_eq!(updated.address.as_deref(), Some("1 Harbour Rd"));
    }

    #[tokio::test]
    async fn test_update_client_rejects_unknown_transfer() {
        let db = setup_db().await;
        let repo = ClientRepository::new(db.pool());

        let client = repo.create(&bob()).await.unwrap();
        let update = ClientUpdate {
            transfers: Some(vec![40]),
            ..Default::default()
        };
        let result = repo.update(client.id, &update).await;

        assert!(matches!(result, Err(HotelError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_client_clears_room_occupant() {
        let db = setup_db().await;
        let repo = ClientRepository::new(db.pool());
        let rooms = RoomRepository::new(db.pool());

        let client = repo.create(&bob()).await.unwrap();
        let mut new_room = NewRoom::new("101", RoomType::Double);
        new_room.current_client = Some(client.id);
        let room = rooms.create(&new_room).await.unwrap();

        assert!(repo.delete(client.id).await.unwrap());
        assert!(!repo.delete(client.id).await.unwrap());

        let room = rooms.get_by_id(room.id).await.unwrap().unwrap();
        assert!(room.current_client.is_none());
    }
}
