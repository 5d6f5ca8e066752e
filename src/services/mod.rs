//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod auth;
pub mod chat;
pub mod message;
pub mod user;

// Re-exports per facilitare l'import
pub use auth::{current_user, login_user, logout_user, register_user};
pub use chat::{create_private_chat, list_private_chats};
pub use message::{
    list_private_messages, list_public_messages, mark_chat_as_read, mark_message_as_read,
    send_private_message, send_public_message, unread_public_count,
};
pub use user::{list_online_users, list_users};

use crate::AppState;
use crate::dtos::{StatusDTO, TableCountsDTO};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, instrument};

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}

async fn table_counts(state: &AppState) -> Result<TableCountsDTO, sqlx::Error> {
    Ok(TableCountsDTO {
        users: state.user.count().await?,
        messages: state.msg.count().await?,
        sessions: state.session.count().await?,
        private_chats: state.chat.count().await?,
    })
}

/// Stato del database: conteggio righe per tabella
#[instrument(skip(state))]
pub async fn status(State(state): State<Arc<AppState>>) -> Response {
    match table_counts(&state).await {
        Ok(counts) => Json(StatusDTO {
            status: "connected".to_string(),
            counts,
            ready: true,
        })
        .into_response(),
        Err(e) => {
            error!("Status check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusDTO {
                    status: "error".to_string(),
                    counts: TableCountsDTO::default(),
                    ready: false,
                }),
            )
                .into_response()
        }
    }
}
