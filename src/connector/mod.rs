//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion clients (OpenAI Chat Completions, offline mock)
//! - Session storage (in-memory)
//! - HTTP API and the server-rendered chat page

pub mod adapter;
pub mod api;
pub mod view;

pub use adapter::*;
pub use api::*;
pub use view::*;
