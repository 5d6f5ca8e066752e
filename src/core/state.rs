//! Application State - Stato globale dell'applicazione
//!
//! Contiene i repository e le impostazioni condivise fra tutte le route e i middleware.

use crate::repositories::{
    MessageRepository, PrivateChatRepository, SessionRepository, UserRepository,
};
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: UserRepository,

    /// Repository per le sessioni server-side
    pub session: SessionRepository,

    /// Repository per la gestione dei messaggi
    pub msg: MessageRepository,

    /// Repository per le chat private
    pub chat: PrivateChatRepository,

    /// Aggiunge `Secure` al cookie di sessione
    pub secure_cookies: bool,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni condiviso
    /// * `secure_cookies` - true in produzione (HTTPS)
    pub fn new(pool: SqlitePool, secure_cookies: bool) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            session: SessionRepository::new(pool.clone()),
            msg: MessageRepository::new(pool.clone()),
            chat: PrivateChatRepository::new(pool),
            secure_cookies,
        }
    }
}
