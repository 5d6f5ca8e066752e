//! User services - Presenza e directory utenti

use crate::core::{AppError, AppState, CurrentSession};
use crate::dtos::UserDTO;
use axum::{
    Extension,
    extract::{Json, State},
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Tutti gli utenti con isOnline/lastSeen. Il client filtra se stesso dalla lista.
#[instrument(skip(state, current), fields(user_id = %current.user.id))]
pub async fn list_online_users(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<Vec<UserDTO>>, AppError> {
    let users: Vec<UserDTO> = state
        .user
        .find_all()
        .await?
        .into_iter()
        .map(UserDTO::from)
        .collect();

    let online = users.iter().filter(|u| u.is_online).count();
    info!("Returning {} users, {} online", users.len(), online);
    Ok(Json(users))
}

#[instrument(skip(state, current), fields(user_id = %current.user.id))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<Vec<UserDTO>>, AppError> {
    let users = state.user.find_all().await?;
    Ok(Json(users.into_iter().map(UserDTO::from).collect()))
}
