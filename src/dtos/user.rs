//! User DTOs - Data Transfer Objects per utenti

use crate::entities::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Utente come visto dal client: la password non viene mai esposta
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub is_online: bool,
    pub last_seen: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            username: value.username,
            email: value.email,
            avatar: value.avatar,
            is_online: value.is_online,
            last_seen: value.last_seen,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Wrapper `{ "user": ... }` restituito dagli endpoint di autenticazione
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponseDTO {
    pub user: UserDTO,
}

/// DTO per creare un nuovo utente (senza id). Validato dopo il trim dei campi.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDTO {
    #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
    pub username: String,

    #[validate(
        email(message = "Email must be a valid address"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 255, message = "Password must be between 1 and 255 characters"))]
    pub password: String,
}

/// Body di POST /auth/register. I campi sono opzionali per poter rispondere
/// 400 "All fields are required" quando mancano.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegisterDTO {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterDTO {
    /// Returns the trimmed username and email plus the password, or `None`
    /// when any of the three is missing or blank.
    pub fn required_fields(&self) -> Option<CreateUserDTO> {
        let username = non_blank(self.username.as_deref())?;
        let email = non_blank(self.email.as_deref())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some(CreateUserDTO {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Body di POST /auth/login
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginDTO {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginDTO {
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        let email = non_blank(self.email.as_deref())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((email, password))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
