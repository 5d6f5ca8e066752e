//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod maintenance;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    use services::*;

    Router::new()
        .route("/", get(root))
        .route("/status", get(status))
        .nest("/auth", configure_auth_routes(state.clone()))
        .nest("/messages", configure_message_routes(state.clone()))
        .nest("/users", configure_user_routes(state.clone()))
        .nest("/chats", configure_chat_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Configura le routes di autenticazione (register, login, logout, me)
fn configure_auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    // logout gestisce da solo una sessione assente o scaduta
    let public_routes = Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/logout", post(logout_user));

    let session_routes = Router::new()
        .route("/me", get(current_user))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    public_routes.merge(session_routes)
}

/// Configura le routes dei messaggi pubblici e privati
fn configure_message_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_public_messages).post(send_public_message))
        .route("/unread", get(unread_public_count))
        .route("/{message_id}/read", patch(mark_message_as_read))
        .route(
            "/private/{chat_id}",
            get(list_private_messages).post(send_private_message),
        )
        .route("/private/{chat_id}/read", post(mark_chat_as_read))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes per la gestione degli utenti
fn configure_user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_users))
        .route("/online", get(list_online_users))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes per le chat private
fn configure_chat_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/private", get(list_private_chats).post(create_private_chat))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
