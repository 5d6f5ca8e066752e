//! User entity - Entità utente

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    // salvata e confrontata in chiaro, mai esposta al client
    #[serde(skip_serializing)]
    pub password: String,
    pub avatar: Option<String>,
    pub is_online: bool,
    pub last_seen: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Plain equality check against the stored password.
    pub fn verify_password(&self, target_password: &str) -> bool {
        self.password == target_password
    }
}
