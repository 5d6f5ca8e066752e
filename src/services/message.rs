//! Message services - Bacheca pubblica e messaggi privati

use super::chat::require_chat_member;
use crate::core::{AppError, AppState, CurrentSession};
use crate::dtos::{
    CreateMessageDTO, MarkedReadDTO, MessageDTO, SendPrivateMessageDTO, SendPublicMessageDTO,
    UnreadCountDTO, normalize_content,
};
use crate::entities::ChatType;
use crate::repositories::{Create, PUBLIC_BOARD_LIMIT, Read};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current), fields(user_id = %current.user.id))]
pub async fn list_public_messages(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<Vec<MessageDTO>>, AppError> {
    debug!("Fetching public messages");
    let messages: Vec<MessageDTO> = state
        .msg
        .find_public(PUBLIC_BOARD_LIMIT)
        .await?
        .into_iter()
        .map(MessageDTO::from)
        .collect();

    info!("Found {} public messages", messages.len());
    Ok(Json(messages))
}

#[instrument(skip(state, current, body), fields(user_id = %current.user.id))]
pub async fn send_public_message(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    WithRejection(Json(body), _): WithRejection<Json<SendPublicMessageDTO>, AppError>,
) -> Result<(StatusCode, Json<MessageDTO>), AppError> {
    // 1. content e userId obbligatori, altrimenti BAD_REQUEST
    // 2. userId deve coincidere con l'utente della sessione, altrimenti FORBIDDEN
    // 3. Inserire il messaggio e rileggerlo con lo username risolto
    let (content, user_id) = match (normalize_content(body.content.as_deref()), body.user_id) {
        (Some(content), Some(user_id)) => (content, user_id),
        _ => {
            warn!("Missing content or userId");
            return Err(AppError::bad_request("Content and userId are required"));
        }
    };

    if user_id != current.user.id {
        warn!(
            "User ID mismatch: request {} session {}",
            user_id, current.user.id
        );
        return Err(AppError::forbidden("Unauthorized"));
    }

    let new_message = CreateMessageDTO::public(content, user_id, Utc::now());
    new_message.validate()?;

    let message = state.msg.create(&new_message).await?;
    info!("Public message {} created", message.id);

    Ok((StatusCode::CREATED, Json(MessageDTO::from(message))))
}

#[instrument(skip(state, current), fields(user_id = %current.user.id))]
pub async fn unread_public_count(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<UnreadCountDTO>, AppError> {
    let count = state.msg.count_unread_public(current.user.id).await?;
    Ok(Json(UnreadCountDTO { count }))
}

#[instrument(skip(state, current), fields(user_id = %current.user.id, message_id = %message_id))]
pub async fn mark_message_as_read(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Path(message_id): Path<i64>,
) -> Result<Json<MessageDTO>, AppError> {
    // 1. Messaggio privato: solo il destinatario può segnarlo come letto
    // 2. Messaggio pubblico: chiunque tranne l'autore
    let message = state
        .msg
        .read(&message_id)
        .await?
        .ok_or_else(|| AppError::not_found("Message not found"))?;

    if message.is_private() {
        if message.receiver_id != Some(current.user.id) {
            warn!("User is not the receiver of message {}", message_id);
            return Err(AppError::forbidden(
                "Only the receiver can mark this message as read",
            ));
        }
    } else if message.user_id == current.user.id {
        warn!("User is the author of public message {}", message_id);
        return Err(AppError::forbidden("Cannot mark your own message as read"));
    }

    if !message.is_read {
        state.msg.mark_as_read(message_id, Utc::now()).await?;
    }

    let updated = state
        .msg
        .read(&message_id)
        .await?
        .ok_or_else(|| AppError::not_found("Message not found"))?;
    Ok(Json(MessageDTO::from(updated)))
}

#[instrument(skip(state, current), fields(user_id = %current.user.id, chat_id = %chat_id))]
pub async fn list_private_messages(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Path(chat_id): Path<i64>,
) -> Result<Json<Vec<MessageDTO>>, AppError> {
    debug!("Fetching private messages");
    let messages: Vec<MessageDTO> = state
        .msg
        .find_private(chat_id, current.user.id)
        .await?
        .into_iter()
        .map(MessageDTO::from)
        .collect();

    info!("Found {} private messages", messages.len());
    Ok(Json(messages))
}

#[instrument(skip(state, current, body), fields(user_id = %current.user.id, chat_id = %chat_id))]
pub async fn send_private_message(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Path(chat_id): Path<i64>,
    WithRejection(Json(body), _): WithRejection<Json<SendPrivateMessageDTO>, AppError>,
) -> Result<(StatusCode, Json<MessageDTO>), AppError> {
    // 1. content e receiverId obbligatori, altrimenti BAD_REQUEST
    // 2. La chat deve essere tra quelle dell'utente, altrimenti FORBIDDEN
    // 3. receiverId deve essere l'altro partecipante della chat
    // 4. Inserire il messaggio privato con tipo e fileInfo opzionali
    let (content, receiver_id) =
        match (normalize_content(body.content.as_deref()), body.receiver_id) {
            (Some(content), Some(receiver_id)) => (content, receiver_id),
            _ => {
                warn!("Missing content or receiverId");
                return Err(AppError::bad_request("Content and receiver are required"));
            }
        };

    let chat = require_chat_member(&state, chat_id, current.user.id).await?;

    if chat.other_member(current.user.id) != Some(receiver_id) {
        warn!("Receiver {} is not part of chat {}", receiver_id, chat_id);
        return Err(AppError::bad_request("Receiver is not part of this chat"));
    }

    let new_message = CreateMessageDTO {
        content,
        user_id: current.user.id,
        message_type: body.message_type,
        chat_type: ChatType::Private,
        private_chat_id: Some(chat.id),
        receiver_id: Some(receiver_id),
        file_info: body.file_info,
        created_at: Utc::now(),
    };
    new_message.validate()?;

    let message = state.msg.create(&new_message).await?;
    info!("Private message {} created", message.id);

    Ok((StatusCode::CREATED, Json(MessageDTO::from(message))))
}

#[instrument(skip(state, current), fields(user_id = %current.user.id, chat_id = %chat_id))]
pub async fn mark_chat_as_read(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Path(chat_id): Path<i64>,
) -> Result<Json<MarkedReadDTO>, AppError> {
    let chat = require_chat_member(&state, chat_id, current.user.id).await?;
    let updated = state
        .msg
        .mark_chat_as_read(chat.id, current.user.id, Utc::now())
        .await?;

    info!("Marked {} messages as read", updated);
    Ok(Json(MarkedReadDTO { updated }))
}
