//! Message DTOs - Data Transfer Objects per messaggi

use crate::entities::{ChatType, FileInfo, Message, MessageType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageDTO {
    pub id: i64,
    pub content: String,
    pub username: String,
    pub user_id: i64,
    pub message_type: MessageType,
    pub is_read: bool,
    pub chat_type: ChatType,
    pub private_chat_id: Option<i64>,
    pub receiver_id: Option<i64>,
    pub file_info: Option<FileInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Message> for MessageDTO {
    fn from(value: Message) -> Self {
        Self {
            id: value.id,
            content: value.content,
            username: value.username,
            user_id: value.user_id,
            message_type: value.message_type,
            is_read: value.is_read,
            chat_type: value.chat_type,
            private_chat_id: value.private_chat_id,
            receiver_id: value.receiver_id,
            file_info: value.file_info.map(|info| info.0),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// DTO per creare un nuovo messaggio (senza id)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateMessageDTO {
    #[validate(length(min = 1, max = 5000, message = "Message content must be between 1 and 5000 characters"))]
    pub content: String,

    pub user_id: i64,
    pub message_type: MessageType,
    pub chat_type: ChatType,
    pub private_chat_id: Option<i64>,
    pub receiver_id: Option<i64>,
    pub file_info: Option<FileInfo>,
    pub created_at: DateTime<Utc>,
}

impl CreateMessageDTO {
    pub fn public(content: String, user_id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            content,
            user_id,
            message_type: MessageType::Text,
            chat_type: ChatType::Public,
            private_chat_id: None,
            receiver_id: None,
            file_info: None,
            created_at,
        }
    }
}

/// Body di POST /messages
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SendPublicMessageDTO {
    pub content: Option<String>,
    pub user_id: Option<i64>,
}

/// Body di POST /messages/private/{chat_id}
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SendPrivateMessageDTO {
    pub content: Option<String>,
    pub receiver_id: Option<i64>,
    #[serde(default)]
    pub message_type: MessageType,
    pub file_info: Option<FileInfo>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UnreadCountDTO {
    pub count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MarkedReadDTO {
    pub updated: u64,
}

/// Trims message content and drops it when nothing is left.
pub fn normalize_content(content: Option<&str>) -> Option<String> {
    content
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
