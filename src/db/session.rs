//! Session store for cookie authentication.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use super::user::Role;
use super::{now_timestamp, DbPool};
use crate::{HotelError, Result};

const SESSION_COLUMNS: &str = "id, token, user_id, username, role, created_at, expires_at";

/// Server-side session bound to an opaque cookie token.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID.
    pub id: i64,
    /// Opaque token carried by the cookie.
    pub token: String,
    /// Authenticated user.
    pub user_id: i64,
    /// Username at login time.
    pub username: String,
    /// Role snapshot taken at login; not refreshed until the next login.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: String,
    /// Expiration timestamp.
    pub expires_at: String,
}

impl<'r> FromRow<'r, SqliteRow> for Session {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;
        Ok(Self {
            id: row.try_get("id")?,
            token: row.try_get("token")?,
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            role: role.parse().map_err(|e: String| sqlx::Error::Decode(e.into()))?,
            created_at: row.try_get("created_at")?,
            expires_at: row.try_get("expires_at")?,
        })
    }
}

/// New session for creation.
pub struct NewSession {
    /// Token string.
    pub token: String,
    /// User ID.
    pub user_id: i64,
    /// Username.
    pub username: String,
    /// Role snapshot.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: String,
    /// Expiration timestamp.
    pub expires_at: String,
}

/// Repository for session operations.
pub struct SessionRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new session.
    pub async fn create(&self, new_session: &NewSession) -> Result<Session> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO sessions (token, user_id, username, role, created_at, expires_at)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_session.token)
        .bind(new_session.user_id)
        .bind(&new_session.username)
        .bind(new_session.role.as_str())
        .bind(&new_session.created_at)
        .bind(&new_session.expires_at)
        .fetch_one(self.pool)
        .await?;

        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?");
        sqlx::query_as::<_, Session>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| HotelError::NotFound("session".to_string()))
    }

    /// Get a session that has not expired yet.
    ///
    /// Expired sessions are indistinguishable from missing ones.
    pub async fn get_valid(&self, token: &str) -> Result<Option<Session>> {
        let sql =
            format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE token = ? AND expires_at > ?");
        let session = sqlx::query_as::<_, Session>(&sql)
            .bind(token)
            .bind(now_timestamp())
            .fetch_optional(self.pool)
            .await?;

        Ok(session)
    }

    /// Delete a session by token.
    ///
    /// Returns false when no session matched.
    pub async fn delete(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete expired sessions (cleanup).
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now_timestamp())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Count stored sessions, expired ones included.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn setup_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        UserRepository::new(db.pool())
            .create(&NewUser::new("alice", "hashedpassword"))
            .await
            .unwrap();
        db
    }

    fn new_session(token: &str, expires_at: &str) -> NewSession {
        NewSession {
            token: token.to_string(),
            user_id: 1,
            username: "alice".to_string(),
            role: Role::Staff,
            created_at: "2020-01-01 00:00:00".to_string(),
            expires_at: expires_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_session() {
        let db = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        let session = repo
            .create(&new_session("token-1", "2099-12-31 23:59:59"))
            .await
            .unwrap();

        assert_eq!(session.token, "token-1");
        assert_eq!(session.user_id, 1);
        assert_eq!(session.role, Role::Staff);
    }

    #[tokio::test]
    async fn test_get_valid() {
        let db = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&new_session("live", "2099-12-31 23:59:59"))
            .await
            .unwrap();

        let session = repo.get_valid("live").await.unwrap().unwrap();
        assert_eq!(session.username, "alice");
        assert!(repo.get_valid("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_valid_expired() {
        let db = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&new_session("stale", "2020-01-01 01:00:00"))
            .await
            .unwrap();

        assert!(repo.get_valid("stale").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&new_session("token-1", "2099-12-31 23:59:59"))
            .await
            .unwrap();

        assert!(repo.delete("token-1").await.unwrap());
        assert!(!repo.delete("token-1").await.unwrap());
        assert!(repo.get_valid("token-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let db = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&new_session("stale", "2020-01-01 01:00:00"))
            .await
            .unwrap();
        repo.create(&new_session("live", "2099-12-31 23:59:59"))
            .await
            .unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.get_valid("live").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_token_rejected() {
        let db = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&new_session("same", "2099-12-31 23:59:59"))
            .await
            .unwrap();
        let result = repo.create(&new_session("same", "2099-12-31 23:59:59")).await;

        assert!(matches!(result, Err(HotelError::Conflict(_))));
    }
}
