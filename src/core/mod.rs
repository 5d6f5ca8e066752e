//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Sessioni e autenticazione via cookie
//! - Configurazione
//! - Pool del database
//! - Gestione errori
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{
    CurrentSession, SESSION_COOKIE, SESSION_TTL_HOURS, authentication_middleware,
    clear_session_cookie, create_session, create_session_at, destroy_session, resolve_session,
    session_cookie, session_token_from_headers,
};
pub use config::Config;
pub use database::connect_pool;
pub use error::AppError;
pub use state::AppState;
