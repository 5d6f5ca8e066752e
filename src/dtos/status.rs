//! Status DTOs - Stato del database per GET /status

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableCountsDTO {
    pub users: i64,
    pub messages: i64,
    pub sessions: i64,
    pub private_chats: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusDTO {
    pub status: String,
    pub counts: TableCountsDTO,
    pub ready: bool,
}
