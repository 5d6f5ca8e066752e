#![allow(dead_code)]

use axum_test::TestServer;
use axum_test::http::HeaderName;
use chat_server::core::{AppState, create_session};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Crea un AppState per i test (cookie senza `Secure`)
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, false))
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = chat_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Crea direttamente una sessione valida per 24 ore e ne restituisce il token
pub async fn create_test_session(state: &AppState, user_id: i64, username: &str) -> String {
    create_session(state, user_id, username)
        .await
        .expect("Failed to create test session")
}

pub fn cookie_header() -> HeaderName {
    HeaderName::from_static("cookie")
}

pub fn session_cookie_value(token: &str) -> String {
    format!("session={}", token)
}

/// Estrae il token dal primo `Set-Cookie` della risposta
pub fn token_from_set_cookie(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("session="))
        .expect("Set-Cookie should carry the session token")
        .to_string()
}
