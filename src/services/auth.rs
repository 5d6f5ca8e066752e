//! Auth services - Registrazione, login, logout e utente corrente

use crate::core::{
    AppError, AppState, CurrentSession, clear_session_cookie, create_session, destroy_session,
    resolve_session, session_cookie, session_token_from_headers,
};
use crate::dtos::{AuthResponseDTO, LoginDTO, RegisterDTO, UserDTO};
use crate::repositories::Create;
use axum::{
    Extension,
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

fn set_cookie_headers(cookie: &str) -> Result<HeaderMap, AppError> {
    let value = HeaderValue::from_str(cookie).map_err(|e| {
        error!("Invalid Set-Cookie value: {}", e);
        AppError::internal_server_error("Internal server error")
    })?;
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, value);
    Ok(headers)
}

#[instrument(skip(state, body))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<RegisterDTO>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Verificare che username, email e password siano presenti, altrimenti BAD_REQUEST
    // 2. Validare formato e lunghezze dei valori già ripuliti
    // 3. Se esiste già un utente con la stessa email, BAD_REQUEST "User already exists"
    // 4. Creare l'utente (password salvata così com'è), poi la sessione
    // 5. Segnare l'utente online e restituire 201 con il cookie di sessione
    let new_user = body.required_fields().ok_or_else(|| {
        warn!("Registration attempted with missing fields");
        AppError::bad_request("All fields are required")
    })?;
    new_user.validate()?;

    if state.user.find_by_email(&new_user.email).await?.is_some() {
        warn!("Registration attempted with an existing email");
        return Err(AppError::bad_request("User already exists"));
    }

    let created = match state.user.create(&new_user).await {
        Ok(user) => user,
        // due registrazioni concorrenti con la stessa email: vince il vincolo UNIQUE
        Err(e)
            if e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false) =>
        {
            warn!("Duplicate email rejected by the store");
            return Err(AppError::bad_request("User already exists"));
        }
        Err(e) => return Err(e.into()),
    };

    let token = create_session(&state, created.id, &created.username).await?;
    let now = Utc::now();
    state.user.update_online_status(created.id, true, now).await?;

    let mut user = UserDTO::from(created);
    user.is_online = true;
    user.last_seen = now;

    info!("User {} registered", user.id);
    let headers = set_cookie_headers(&session_cookie(&token, state.secure_cookies))?;
    Ok((StatusCode::CREATED, headers, Json(AuthResponseDTO { user })))
}

#[instrument(skip(state, body))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<LoginDTO>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Email e password obbligatorie, altrimenti BAD_REQUEST
    // 2. Cercare l'utente per email; se non esiste UNAUTHORIZED
    // 3. Confronto diretto della password; se diversa UNAUTHORIZED
    // 4. Creare la sessione, segnare l'utente online, impostare il cookie
    let (email, password) = body.required_fields().ok_or_else(|| {
        warn!("Login attempted with missing fields");
        AppError::bad_request("Email and password are required")
    })?;

    let user = match state.user.find_by_email(email).await? {
        Some(user) if user.verify_password(password) => user,
        _ => {
            warn!("Invalid credentials");
            return Err(AppError::unauthorized("Invalid credentials"));
        }
    };

    let token = create_session(&state, user.id, &user.username).await?;
    let now = Utc::now();
    state.user.update_online_status(user.id, true, now).await?;

    let mut user = UserDTO::from(user);
    user.is_online = true;
    user.last_seen = now;

    info!("User {} logged in", user.id);
    let headers = set_cookie_headers(&session_cookie(&token, state.secure_cookies))?;
    Ok((StatusCode::OK, headers, Json(AuthResponseDTO { user })))
}

/// Sempre 200: se la sessione è valida viene rimossa e l'utente va offline,
/// in ogni caso il cookie viene cancellato.
#[instrument(skip(state, headers))]
pub async fn logout_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = session_token_from_headers(&headers) {
        if let Some(current) = resolve_session(&state, &token, Utc::now()).await? {
            state
                .user
                .update_online_status(current.user.id, false, Utc::now())
                .await?;
            destroy_session(&state, &current.session_id).await?;
            info!("User {} logged out", current.user.id);
        } else {
            debug!("Logout with a stale session cookie");
        }
    }

    let headers = set_cookie_headers(&clear_session_cookie(state.secure_cookies))?;
    Ok((
        StatusCode::OK,
        headers,
        Json(serde_json::json!({ "success": true })),
    ))
}

#[instrument(skip(current), fields(user_id = %current.user.id))]
pub async fn current_user(
    Extension(current): Extension<CurrentSession>,
) -> Json<AuthResponseDTO> {
    Json(AuthResponseDTO { user: current.user })
}
