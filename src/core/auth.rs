use crate::core::{AppError, AppState};
use crate::dtos::UserDTO;
use crate::repositories::{Create, CreateSessionDTO, Delete, Read};
use axum::extract::State;
use axum::{body::Body, extract::Request, http::HeaderMap, http::Response, middleware::Next};
use axum_extra::headers::{Cookie, HeaderMapExt};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Nome del cookie che trasporta il token di sessione
pub const SESSION_COOKIE: &str = "session";

/// Durata di una sessione dalla sua creazione
pub const SESSION_TTL_HOURS: i64 = 24;

// 32 byte casuali -> 256 bit, resi come 64 caratteri esadecimali
const SESSION_TOKEN_BYTES: usize = 32;

/// Identità del chiamante, inserita nelle Extension dal middleware di autenticazione
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub session_id: String,
    pub user: UserDTO,
}

pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Creates a session for the user and returns its token
pub async fn create_session(
    state: &AppState,
    user_id: i64,
    username: &str,
) -> Result<String, sqlx::Error> {
    create_session_at(state, user_id, username, Utc::now()).await
}

#[instrument(skip(state, username), fields(user_id = %user_id))]
pub async fn create_session_at(
    state: &AppState,
    user_id: i64,
    username: &str,
    now: DateTime<Utc>,
) -> Result<String, sqlx::Error> {
    let data = CreateSessionDTO {
        id: generate_session_token(),
        user_id,
        username: username.to_string(),
        created_at: now,
        expires_at: now + Duration::hours(SESSION_TTL_HOURS),
    };
    let session = state.session.create(&data).await?;
    info!("Session created");
    Ok(session.id)
}

/// Resolves a token to its session and owning user (password excluded).
///
/// Returns `Ok(None)` for unknown, expired or orphaned sessions and when the
/// sessions table has not been provisioned. Other store errors become a
/// generic "Authentication failed".
#[instrument(skip(state, token))]
pub async fn resolve_session(
    state: &AppState,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Option<CurrentSession>, AppError> {
    if token.is_empty() {
        return Ok(None);
    }

    let session = match state.session.find_valid(token, now).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            debug!("Session not found or expired");
            return Ok(None);
        }
        Err(e) if is_missing_table(&e) => {
            warn!("Sessions table missing, treating request as anonymous: {}", e);
            return Ok(None);
        }
        Err(e) => {
            error!("Session lookup failed: {}", e);
            return Err(AppError::internal_server_error("Authentication failed"));
        }
    };

    let user = match state.user.read(&session.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("User {} not found for session", session.user_id);
            return Ok(None);
        }
        Err(e) if is_missing_table(&e) => return Ok(None),
        Err(e) => {
            error!("User lookup failed: {}", e);
            return Err(AppError::internal_server_error("Authentication failed"));
        }
    };

    debug!("Session resolved for user {}", user.username);
    Ok(Some(CurrentSession {
        session_id: session.id,
        user: UserDTO::from(user),
    }))
}

/// Idempotent: removing an already missing session is not an error
pub async fn destroy_session(state: &AppState, session_id: &str) -> Result<(), sqlx::Error> {
    state.session.delete(session_id).await
}

fn is_missing_table(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.message().contains("no such table"))
        .unwrap_or(false)
}

/// Reads the session token from the `Cookie` header
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Cookie>()
        .and_then(|cookie| cookie.get(SESSION_COOKIE).map(str::to_string))
        .filter(|token| !token.is_empty())
}

/// Valore di `Set-Cookie` per un nuovo token di sessione
pub fn session_cookie(token: &str, secure: bool) -> String {
    format!(
        "{}={}; HttpOnly;{} SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        token,
        if secure { " Secure;" } else { "" },
        SESSION_TTL_HOURS * 60 * 60
    )
}

/// `Set-Cookie` con Max-Age=0 per forzare il logout lato client
pub fn clear_session_cookie(secure: bool) -> String {
    format!(
        "{}=; HttpOnly;{} SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE,
        if secure { " Secure;" } else { "" }
    )
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let token = session_token_from_headers(req.headers()).ok_or_else(|| {
        warn!("Missing session cookie");
        AppError::unauthorized("Not authenticated")
    })?;

    let current = resolve_session(&state, &token, Utc::now())
        .await?
        .ok_or_else(|| {
            warn!("Invalid or expired session");
            AppError::unauthorized("Not authenticated")
        })?;

    debug!("User authenticated: {}", current.user.username);
    req.extensions_mut().insert(current);
    Ok(next.run(req).await)
}
