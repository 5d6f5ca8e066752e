//! PrivateChatRepository - Repository per le chat private

use super::Read;
use crate::entities::PrivateChat;
use chrono::{DateTime, Utc};
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

/// Riga della lista chat con l'altro partecipante e l'anteprima dell'ultimo messaggio
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PrivateChatSummaryRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub other_id: i64,
    pub other_username: String,
    pub other_email: String,
    pub other_avatar: Option<String>,
    pub other_is_online: bool,
    pub other_last_seen: DateTime<Utc>,
    pub other_created_at: DateTime<Utc>,
    pub other_updated_at: DateTime<Utc>,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub unread_count: i64,
}

// PRIVATE CHAT REPOSITORY
pub struct PrivateChatRepository {
    connection_pool: SqlitePool,
}

impl PrivateChatRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Get the chat for an unordered pair of users, if it exists
    #[instrument(skip(self))]
    pub async fn find_between_users(
        &self,
        user_a: i64,
        user_b: i64,
    ) -> Result<Option<PrivateChat>, Error> {
        let (user1_id, user2_id) = PrivateChat::normalize_pair(user_a, user_b);
        let chat = sqlx::query_as::<_, PrivateChat>(
            r#"
            SELECT id, user1_id, user2_id, created_at, updated_at
            FROM private_chats
            WHERE user1_id = ? AND user2_id = ?
            "#,
        )
        .bind(user1_id)
        .bind(user2_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(chat)
    }

    /// Find-or-create for the unordered pair (user_a, user_b).
    ///
    /// The unique key on the normalized pair is the source of truth: concurrent
    /// callers all insert with `ON CONFLICT DO NOTHING` and then read the one row.
    #[instrument(skip(self))]
    pub async fn create_or_get(&self, user_a: i64, user_b: i64) -> Result<PrivateChat, Error> {
        let (user1_id, user2_id) = PrivateChat::normalize_pair(user_a, user_b);
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO private_chats (user1_id, user2_id, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (user1_id, user2_id) DO NOTHING
            "#,
        )
        .bind(user1_id)
        .bind(user2_id)
        .bind(now)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() > 0 {
            info!("Private chat created between users {} and {}", user1_id, user2_id);
        } else {
            debug!("Private chat already exists");
        }

        self.find_between_users(user1_id, user2_id)
            .await?
            .ok_or(Error::RowNotFound)
    }

    /// Every chat containing `user_id`
    #[instrument(skip(self))]
    pub async fn find_many_by_user_id(&self, user_id: i64) -> Result<Vec<PrivateChat>, Error> {
        let chats = sqlx::query_as::<_, PrivateChat>(
            r#"
            SELECT id, user1_id, user2_id, created_at, updated_at
            FROM private_chats
            WHERE user1_id = ? OR user2_id = ?
            ORDER BY updated_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(chats)
    }

    /// Chat list for `user_id`: other party, last message and unread count
    /// (messages addressed to `user_id` still unread), most recent activity first.
    #[instrument(skip(self))]
    pub async fn find_summaries_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Vec<PrivateChatSummaryRow>, Error> {
        let rows = sqlx::query_as::<_, PrivateChatSummaryRow>(
            r#"
            SELECT
                pc.id,
                pc.created_at,
                pc.updated_at,
                u.id         AS other_id,
                u.username   AS other_username,
                u.email      AS other_email,
                u.avatar     AS other_avatar,
                u.is_online  AS other_is_online,
                u.last_seen  AS other_last_seen,
                u.created_at AS other_created_at,
                u.updated_at AS other_updated_at,
                (SELECT m.content FROM messages m
                  WHERE m.private_chat_id = pc.id
                  ORDER BY m.created_at DESC, m.id DESC LIMIT 1) AS last_message,
                (SELECT m.created_at FROM messages m
                  WHERE m.private_chat_id = pc.id
                  ORDER BY m.created_at DESC, m.id DESC LIMIT 1) AS last_message_time,
                (SELECT COUNT(*) FROM messages m
                  WHERE m.private_chat_id = pc.id
                    AND m.receiver_id = ?
                    AND m.is_read = 0) AS unread_count
            FROM private_chats pc
            INNER JOIN users u
                ON u.id = CASE WHEN pc.user1_id = ? THEN pc.user2_id ELSE pc.user1_id END
            WHERE pc.user1_id = ? OR pc.user2_id = ?
            ORDER BY COALESCE(last_message_time, pc.updated_at) DESC, pc.id DESC
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Found {} chats for user", rows.len());
        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM private_chats")
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Read<PrivateChat, i64> for PrivateChatRepository {
    async fn read(&self, id: &i64) -> Result<Option<PrivateChat>, Error> {
        let chat = sqlx::query_as::<_, PrivateChat>(
            "SELECT id, user1_id, user2_id, created_at, updated_at FROM private_chats WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(chat)
    }
}
