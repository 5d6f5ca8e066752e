//! SessionRepository - Sessioni server-side con scadenza

use super::{Create, Delete};
use crate::entities::Session;
use chrono::{DateTime, Utc};
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

/// DTO per creare una sessione: il token viene generato dal chiamante
#[derive(Debug, Clone)]
pub struct CreateSessionDTO {
    pub id: String,
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

// SESSION REPO
pub struct SessionRepository {
    connection_pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Find a session that is still valid at `now`. Expired rows are treated as absent.
    #[instrument(skip(self, id))]
    pub async fn find_valid(&self, id: &str, now: DateTime<Utc>) -> Result<Option<Session>, Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, username, created_at, expires_at
            FROM sessions
            WHERE id = ? AND expires_at > ?
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(session)
    }

    /// Remove every session expired at `now`, returns how many were removed
    #[instrument(skip(self))]
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.connection_pool)
            .await?;

        let removed = result.rows_affected();
        if removed > 0 {
            info!("Removed {} expired sessions", removed);
        }
        Ok(removed)
    }

    pub async fn count(&self) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Create<Session, CreateSessionDTO> for SessionRepository {
    #[instrument(skip(self, data), fields(user_id = %data.user_id))]
    async fn create(&self, data: &CreateSessionDTO) -> Result<Session, Error> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, username, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.id)
        .bind(data.user_id)
        .bind(&data.username)
        .bind(data.created_at)
        .bind(data.expires_at)
        .execute(&self.connection_pool)
        .await?;

        debug!("Session stored");

        Ok(Session {
            id: data.id.clone(),
            user_id: data.user_id,
            username: data.username.clone(),
            created_at: data.created_at,
            expires_at: data.expires_at,
        })
    }
}

impl Delete<str> for SessionRepository {
    async fn delete(&self, id: &str) -> Result<(), Error> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }
}
