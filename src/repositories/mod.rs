//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Ogni repository gestisce le operazioni di database per una specifica entità
//! ed è l'unico punto dell'applicazione che scrive SQL.
//!
//! Le query sono costruite a runtime con `sqlx::query_as::<_, T>` e mappate con
//! `#[derive(sqlx::FromRow)]`: in questo modo la compilazione non dipende da un
//! database raggiungibile. I valori passano sempre da `.bind(...)`, mai interpolati.
//! Metodi di esecuzione:
//!   `.execute`         INSERT/UPDATE/DELETE
//!   `.fetch_optional`  zero o una riga
//!   `.fetch_one`       esattamente una riga (aggregati)
//!   `.fetch_all`       più righe

pub mod message;
pub mod private_chat;
pub mod session;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read};

// Re-esportazione delle struct dei repository
pub use message::{MessageRepository, PUBLIC_BOARD_LIMIT};
pub use private_chat::{PrivateChatRepository, PrivateChatSummaryRow};
pub use session::{CreateSessionDTO, SessionRepository};
pub use user::UserRepository;
