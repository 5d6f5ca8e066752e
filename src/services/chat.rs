//! Chat services - Chat private tra due utenti

use crate::core::{AppError, AppState, CurrentSession};
use crate::dtos::{CreatePrivateChatDTO, PrivateChatDTO, PrivateChatSummaryDTO, UserDTO};
use crate::entities::PrivateChat;
use crate::repositories::{PrivateChatSummaryRow, Read};
use axum::{
    Extension,
    extract::{Json, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

impl From<PrivateChatSummaryRow> for PrivateChatSummaryDTO {
    fn from(row: PrivateChatSummaryRow) -> Self {
        Self {
            id: row.id,
            other_user: UserDTO {
                id: row.other_id,
                username: row.other_username,
                email: row.other_email,
                avatar: row.other_avatar,
                is_online: row.other_is_online,
                last_seen: row.other_last_seen,
                created_at: row.other_created_at,
                updated_at: row.other_updated_at,
            },
            last_message: row.last_message,
            last_message_time: row.last_message_time,
            unread_count: row.unread_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Verifica che `chat_id` sia tra le chat dell'utente: la lista delle sue chat
/// viene caricata e controllata per appartenenza.
#[instrument(skip(state))]
pub async fn require_chat_member(
    state: &AppState,
    chat_id: i64,
    user_id: i64,
) -> Result<PrivateChat, AppError> {
    state
        .chat
        .find_many_by_user_id(user_id)
        .await?
        .into_iter()
        .find(|chat| chat.id == chat_id)
        .ok_or_else(|| {
            warn!("User {} is not a member of chat {}", user_id, chat_id);
            AppError::forbidden("Access denied to this chat")
        })
}

#[instrument(skip(state, current), fields(user_id = %current.user.id))]
pub async fn list_private_chats(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<Vec<PrivateChatSummaryDTO>>, AppError> {
    debug!("Listing private chats for user");
    let chats: Vec<PrivateChatSummaryDTO> = state
        .chat
        .find_summaries_by_user_id(current.user.id)
        .await?
        .into_iter()
        .map(PrivateChatSummaryDTO::from)
        .collect();

    info!("Found {} private chats", chats.len());
    Ok(Json(chats))
}

#[instrument(skip(state, current, body), fields(user_id = %current.user.id))]
pub async fn create_private_chat(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    WithRejection(Json(body), _): WithRejection<Json<CreatePrivateChatDTO>, AppError>,
) -> Result<(StatusCode, Json<PrivateChatDTO>), AppError> {
    // 1. receiverId obbligatorio e diverso dall'utente corrente, altrimenti BAD_REQUEST
    // 2. Il destinatario deve esistere, altrimenti NOT_FOUND
    // 3. Find-or-create sulla coppia non ordinata: la stessa chat per (A,B) e (B,A)
    let receiver_id = body
        .receiver_id
        .filter(|id| *id != current.user.id)
        .ok_or_else(|| {
            warn!("Invalid receiver for private chat");
            AppError::bad_request("Invalid receiver")
        })?;

    if state.user.read(&receiver_id).await?.is_none() {
        warn!("Receiver {} does not exist", receiver_id);
        return Err(AppError::not_found("Receiver not found"));
    }

    let chat = state.chat.create_or_get(current.user.id, receiver_id).await?;
    info!("Private chat {} ready", chat.id);

    Ok((StatusCode::CREATED, Json(PrivateChatDTO::from(chat))))
}
