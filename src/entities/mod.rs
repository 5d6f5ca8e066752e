//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella nel database.

pub mod enums;
pub mod message;
pub mod private_chat;
pub mod session;
pub mod user;

// Re-exports per facilitare l'import
pub use enums::{ChatType, MessageType};
pub use message::{FileInfo, Message, UNKNOWN_USER};
pub use private_chat::PrivateChat;
pub use session::Session;
pub use user::User;
