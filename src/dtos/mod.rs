//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API, camelCase) dalla rappresentazione interna (entities).

pub mod chat;
pub mod message;
pub mod status;
pub mod user;

// Re-exports
pub use chat::{CreatePrivateChatDTO, PrivateChatDTO, PrivateChatSummaryDTO};
pub use message::{
    CreateMessageDTO, MarkedReadDTO, MessageDTO, SendPrivateMessageDTO, SendPublicMessageDTO,
    UnreadCountDTO, normalize_content,
};
pub use status::{StatusDTO, TableCountsDTO};
pub use user::{AuthResponseDTO, CreateUserDTO, LoginDTO, RegisterDTO, UserDTO};
