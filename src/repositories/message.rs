//! MessageRepository - Repository per la gestione dei messaggi

use super::{Create, Read};
use crate::dtos::CreateMessageDTO;
use crate::entities::{Message, UNKNOWN_USER};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{Error, SqlitePool};
use tracing::{debug, instrument};

/// Max number of messages returned for the public board
pub const PUBLIC_BOARD_LIMIT: i64 = 100;

// Sender username is joined at read time. The first placeholder is the label
// for a missing sender, every query binds UNKNOWN_USER first.
const MESSAGE_SELECT: &str = r#"
    SELECT
        m.id,
        m.content,
        m.user_id,
        COALESCE(u.username, ?) AS username,
        m.message_type,
        m.is_read,
        m.chat_type,
        m.private_chat_id,
        m.receiver_id,
        m.file_info,
        m.created_at,
        m.updated_at
    FROM messages m
    LEFT JOIN users u ON m.user_id = u.id
"#;

// MESSAGE REPO
pub struct MessageRepository {
    connection_pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Most recent public messages, returned oldest first so the client can append.
    /// Ties on `created_at` are broken by id.
    #[instrument(skip(self))]
    pub async fn find_public(&self, limit: i64) -> Result<Vec<Message>, Error> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT * FROM (
                {MESSAGE_SELECT}
                WHERE m.chat_type = 'public'
                ORDER BY m.created_at DESC, m.id DESC
                LIMIT ?
            ) recent
            ORDER BY recent.created_at ASC, recent.id ASC
            "#
        ))
        .bind(UNKNOWN_USER)
        .bind(limit)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Fetched {} public messages", messages.len());
        Ok(messages)
    }

    /// Messages of a private chat visible to `user_id` (as sender or receiver), oldest first
    #[instrument(skip(self))]
    pub async fn find_private(&self, chat_id: i64, user_id: i64) -> Result<Vec<Message>, Error> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            r#"
            {MESSAGE_SELECT}
            WHERE m.chat_type = 'private'
              AND m.private_chat_id = ?
              AND (m.user_id = ? OR m.receiver_id = ?)
            ORDER BY m.created_at ASC, m.id ASC
            "#
        ))
        .bind(UNKNOWN_USER)
        .bind(chat_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Fetched {} private messages", messages.len());
        Ok(messages)
    }

    /// Public messages not written by `user_id` that are still unread
    pub async fn count_unread_public(&self, user_id: i64) -> Result<i64, Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE chat_type = 'public' AND user_id != ? AND is_read = 0",
        )
        .bind(user_id)
        .fetch_one(&self.connection_pool)
        .await
    }

    #[instrument(skip(self))]
    pub async fn mark_as_read(&self, message_id: i64, now: DateTime<Utc>) -> Result<(), Error> {
        sqlx::query("UPDATE messages SET is_read = 1, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(message_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }

    /// Mark every unread message addressed to `receiver_id` in a chat as read
    #[instrument(skip(self))]
    pub async fn mark_chat_as_read(
        &self,
        chat_id: i64,
        receiver_id: i64,
        now: DateTime<Utc>,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE messages SET is_read = 1, updated_at = ?
            WHERE private_chat_id = ? AND receiver_id = ? AND is_read = 0
            "#,
        )
        .bind(now)
        .bind(chat_id)
        .bind(receiver_id)
        .execute(&self.connection_pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Create<Message, CreateMessageDTO> for MessageRepository {
    /// Insert, then read back by id so the returned message carries the joined username
    #[instrument(skip(self, data), fields(user_id = %data.user_id, chat_type = ?data.chat_type))]
    async fn create(&self, data: &CreateMessageDTO) -> Result<Message, Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO messages
                (content, user_id, message_type, is_read, chat_type, private_chat_id, receiver_id, file_info, created_at, updated_at)
            VALUES (?, ?, ?, 0, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.content)
        .bind(data.user_id)
        .bind(data.message_type)
        .bind(data.chat_type)
        .bind(data.private_chat_id)
        .bind(data.receiver_id)
        .bind(data.file_info.as_ref().map(Json))
        .bind(data.created_at)
        .bind(data.created_at)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        debug!("Message inserted with id {}", new_id);

        self.read(&new_id).await?.ok_or(Error::RowNotFound)
    }
}

impl Read<Message, i64> for MessageRepository {
    async fn read(&self, id: &i64) -> Result<Option<Message>, Error> {
        let message = sqlx::query_as::<_, Message>(&format!("{MESSAGE_SELECT} WHERE m.id = ?"))
            .bind(UNKNOWN_USER)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        Ok(message)
    }
}
