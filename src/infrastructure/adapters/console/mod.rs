//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::InlineButton;
use crate::domain::traits::{Bot, BotInfo};

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "profgid-bot".to_string(),
                username: "console".to_string(),
            },
        }
    }

    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        use std::io::Write;
        print!("{}", prompt);
        let _ = std::io::stdout().flush();
        let mut input = String::new();
        let read = std::io::stdin().read_line(&mut input).ok()?;
        if read == 0 {
            return None;
        }
        Some(input.trim().to_string())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok("console_msg".to_string())
    }

    async fn send_with_choices(
        &self,
        _chat_id: &str,
        text: &str,
        choices: &[String],
    ) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        println!("  [Choices] {}", choices.join(" | "));
        Ok("console_msg".to_string())
    }

    async fn send_with_inline(
        &self,
        _chat_id: &str,
        text: &str,
        rows: &[Vec<InlineButton>],
    ) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        for row in rows {
            let row_text: Vec<String> = row
                .iter()
                .map(|b| format!("{} <{}>", b.text, b.payload))
                .collect();
            println!("  [Buttons] {}", row_text.join(" | "));
        }
        Ok("console_msg".to_string())
    }

    async fn answer_callback(&self, _callback_id: &str, text: Option<&str>) -> Result<(), BotError> {
        if let Some(text) = text {
            println!("  [Callback] {}", text);
        }
        Ok(())
    }

    async fn clear_inline_keyboard(
        &self,
        _chat_id: &str,
        _message_id: i64,
    ) -> Result<(), BotError> {
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
