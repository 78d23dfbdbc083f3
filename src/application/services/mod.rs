pub mod conversation_service;
pub mod state_store;
pub mod texts;

pub use conversation_service::ConversationService;
pub use state_store::StateStore;
