//! # Domain Layer
//!
//! Conversation model, session state machine, prompt building and export.
//! This layer is independent of the HTTP stack and the completion provider.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
