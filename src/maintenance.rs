//! Manutenzione periodica - Pulizia delle sessioni scadute
//!
//! Le sessioni scadute sono già ignorate in lettura; questo task le rimuove
//! dal database a intervalli regolari.

use crate::core::AppState;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, error, info};

/// Task che gira in background finché il processo è vivo.
///
/// # Example
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use chat_server::{AppState, maintenance::start_session_cleanup};
/// # async fn run(state: Arc<AppState>) {
/// tokio::spawn(start_session_cleanup(state, 3600));
/// # }
/// ```
pub async fn start_session_cleanup(state: Arc<AppState>, interval_secs: u64) {
    if interval_secs == 0 {
        info!("Session cleanup disabled");
        return;
    }
    info!("Starting session cleanup every {} seconds", interval_secs);

    let mut interval = time::interval(Duration::from_secs(interval_secs));
    loop {
        interval.tick().await;
        match state.session.delete_expired(Utc::now()).await {
            Ok(removed) => debug!("Session cleanup removed {} rows", removed),
            Err(e) => error!("Session cleanup failed: {}", e),
        }
    }
}
