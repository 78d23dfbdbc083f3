use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::InlineButton;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a plain text message to a chat
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError>;

    /// Send a message with a one-time reply keyboard of fixed choices
    async fn send_with_choices(
        &self,
        chat_id: &str,
        text: &str,
        choices: &[String],
    ) -> Result<String, BotError>;

    /// Send a message with inline action buttons
    async fn send_with_inline(
        &self,
        chat_id: &str,
        text: &str,
        rows: &[Vec<InlineButton>],
    ) -> Result<String, BotError>;

    /// Answer a callback query
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), BotError>;

    /// Remove the inline keyboard from an already-sent message
    async fn clear_inline_keyboard(&self, chat_id: &str, message_id: i64) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
