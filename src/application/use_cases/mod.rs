mod export_conversation;
mod get_session;
mod reset_conversation;
mod send_message;
mod start_session;
mod update_settings;

pub use export_conversation::*;
pub use get_session::*;
pub use reset_conversation::*;
pub use send_message::*;
pub use start_session::*;
pub use update_settings::*;
