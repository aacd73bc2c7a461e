pub mod chat_controller;
pub mod export_controller;
pub mod page_controller;
pub mod session_controller;

pub use chat_controller::{ChatController, MessageRequest, RenderedMessage, TurnView};
pub use export_controller::ExportController;
pub use page_controller::PageController;
pub use session_controller::{SessionController, SessionView, SettingsRequest, SettingsView};
