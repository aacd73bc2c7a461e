mod conversation;
mod export;
mod language;
mod message;
mod session;
mod settings;

pub use conversation::*;
pub use export::*;
pub use language::*;
pub use message::*;
pub use session::*;
pub use settings::*;
