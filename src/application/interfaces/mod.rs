mod chat_client;
mod session_repository;

pub use chat_client::*;
pub use session_repository::*;
