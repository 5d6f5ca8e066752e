//! Message entity - Entità messaggio

use super::enums::{ChatType, MessageType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Label shown when the sender row no longer exists.
pub const UNKNOWN_USER: &str = "Unknown User";

/// Metadata of an uploaded file or a shared GIF. Only the description is
/// stored here, the binary lives in the external blob store.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_title: Option<String>,
}

/// Messaggio con lo username del mittente risolto via join al momento della lettura
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub username: String,
    pub message_type: MessageType,
    pub is_read: bool,
    pub chat_type: ChatType,
    pub private_chat_id: Option<i64>,
    pub receiver_id: Option<i64>,
    pub file_info: Option<Json<FileInfo>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    pub fn is_private(&self) -> bool {
        self.chat_type == ChatType::Private
    }
}
