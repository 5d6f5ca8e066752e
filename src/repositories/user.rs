//! UserRepository - Repository per la gestione degli utenti

use super::{Create, Read};
use crate::dtos::CreateUserDTO;
use crate::entities::User;
use chrono::{DateTime, Utc};
use sqlx::{Error, SqlitePool};
use tracing::{debug, instrument};

const USER_COLUMNS: &str =
    "id, username, email, password, avatar, is_online, last_seen, created_at, updated_at";

// USER REPO
pub struct UserRepository {
    connection_pool: SqlitePool,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> UserRepository {
        Self { connection_pool }
    }

    /// Email is the login key and is unique
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }

    /// All users, newest first. The user base is small, no pagination.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<User>, Error> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Loaded {} users", users.len());
        Ok(users)
    }

    /// Flip presence and stamp `last_seen`
    #[instrument(skip(self))]
    pub async fn update_online_status(
        &self,
        user_id: i64,
        is_online: bool,
        now: DateTime<Utc>,
    ) -> Result<(), Error> {
        sqlx::query("UPDATE users SET is_online = ?, last_seen = ?, updated_at = ? WHERE id = ?")
            .bind(is_online)
            .bind(now)
            .bind(now)
            .bind(user_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    #[instrument(skip(self, data), fields(username = %data.username))]
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password, is_online, last_seen, created_at, updated_at)
            VALUES (?, ?, ?, 0, ?, ?, ?)
            "#,
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password)
        .bind(now)
        .bind(now)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        debug!("User inserted with id {}", new_id);

        self.read(&new_id).await?.ok_or(Error::RowNotFound)
    }
}

impl Read<User, i64> for UserRepository {
    async fn read(&self, id: &i64) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}
