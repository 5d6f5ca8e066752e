//! Chat DTOs - Data Transfer Objects per chat private

use crate::dtos::UserDTO;
use crate::entities::PrivateChat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrivateChatDTO {
    pub id: i64,
    pub user1_id: i64,
    pub user2_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PrivateChat> for PrivateChatDTO {
    fn from(value: PrivateChat) -> Self {
        Self {
            id: value.id,
            user1_id: value.user1_id,
            user2_id: value.user2_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Riga della lista chat: l'altro partecipante e l'anteprima dell'ultimo messaggio
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PrivateChatSummaryDTO {
    pub id: i64,
    pub other_user: UserDTO,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub unread_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body di POST /chats/private
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrivateChatDTO {
    pub receiver_id: Option<i64>,
}
