pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{
    ChatClient, ExportConversationUseCase, GetSessionUseCase, ResetConversationUseCase,
    SendMessageUseCase, SessionRepository, SessionUpdate, SettingsChange, StartSessionUseCase,
    TurnOutcome, UpdateSettingsUseCase, COMPLETION_FAILURE_PREFIX,
};

pub use connector::{
    build_router, render_message, render_page, AppState, Container, ContainerConfig,
    InMemorySessionRepository, MockChatClient, OpenAiChatClient, API_KEY_ENV,
};

pub use domain::{
    build_system_prompt, ChatModel, ChatSession, ChatSettings, Conversation, DomainError,
    ExportDocument, Language, Message, PendingTurn, Role, SessionPhase,
};
