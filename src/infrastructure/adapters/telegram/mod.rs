//! Telegram adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::domain::entities::InlineButton;
use crate::domain::traits::{Bot, BotInfo};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Serialize)]
struct ReplyKeyboardMarkup {
    keyboard: Vec<Vec<KeyboardButtonDef>>,
    resize_keyboard: bool,
    one_time_keyboard: bool,
}

#[derive(Serialize)]
struct KeyboardButtonDef {
    text: String,
}

#[derive(Serialize)]
struct InlineKeyboardMarkup {
    inline_keyboard: Vec<Vec<InlineKeyboardButtonDef>>,
}

#[derive(Serialize)]
struct InlineKeyboardButtonDef {
    text: String,
    callback_data: String,
}

#[derive(Deserialize)]
struct MessageResponse {
    result: MessageResult,
}

#[derive(Deserialize)]
struct MessageResult {
    message_id: i64,
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "profgid-bot".to_string(),
                username: "profgid_bot".to_string(),
            },
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    async fn call_api<B: Serialize>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<reqwest::Response, BotError> {
        let response = self
            .client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }
        Ok(response)
    }

    async fn send_for_message_id<B: Serialize>(&self, body: &B) -> Result<String, BotError> {
        let response = self.call_api("sendMessage", body).await?;
        let data: MessageResponse = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;
        Ok(data.result.message_id.to_string())
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct Response {
            result: BotInfoResponse,
        }

        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: String,
        }

        let url = self.api_url("getMe");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        self.info = BotInfo {
            id: data.result.id.to_string(),
            name: data.result.first_name,
            username: data.result.username,
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: i64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: i64,
            allowed_updates: Vec<String>,
        }

        #[derive(Deserialize)]
        struct Response {
            result: Vec<Update>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string(), "callback_query".to_string()],
        };

        let response = self.call_api("getUpdates", &request).await?;
        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data.result)
    }

    /// Offset to confirm the given batch, if it contained any update.
    pub fn next_offset(updates: &[Update]) -> Option<i64> {
        updates.iter().map(|u| u.update_id + 1).max()
    }

    /// Send chat action (typing, upload_photo, etc.)
    pub async fn send_chat_action(&self, chat_id: &str, action: &str) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct SendChatActionRequest {
            chat_id: String,
            action: String,
        }

        let request = SendChatActionRequest {
            chat_id: chat_id.to_string(),
            action: action.to_string(),
        };
        self.call_api("sendChatAction", &request).await?;
        Ok(())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", chat_id, text);

        #[derive(Serialize)]
        struct SendMessageRequest {
            chat_id: String,
            text: String,
        }

        let _ = self.send_chat_action(chat_id, "typing").await;

        let request = SendMessageRequest {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
        };
        self.send_for_message_id(&request).await
    }

    async fn send_with_choices(
        &self,
        chat_id: &str,
        text: &str,
        choices: &[String],
    ) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest {
            chat_id: String,
            text: String,
            reply_markup: ReplyKeyboardMarkup,
        }

        let keyboard = choices
            .iter()
            .map(|choice| {
                vec![KeyboardButtonDef {
                    text: choice.clone(),
                }]
            })
            .collect();

        let request = SendMessageRequest {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            reply_markup: ReplyKeyboardMarkup {
                keyboard,
                resize_keyboard: true,
                one_time_keyboard: true,
            },
        };
        self.send_for_message_id(&request).await
    }

    async fn send_with_inline(
        &self,
        chat_id: &str,
        text: &str,
        rows: &[Vec<InlineButton>],
    ) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest {
            chat_id: String,
            text: String,
            reply_markup: InlineKeyboardMarkup,
        }

        let inline_keyboard = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|btn| InlineKeyboardButtonDef {
                        text: btn.text.clone(),
                        callback_data: btn.payload.clone(),
                    })
                    .collect()
            })
            .collect();

        let request = SendMessageRequest {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            reply_markup: InlineKeyboardMarkup { inline_keyboard },
        };
        self.send_for_message_id(&request).await
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct AnswerRequest {
            callback_query_id: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            text: Option<String>,
        }

        let request = AnswerRequest {
            callback_query_id: callback_id.to_string(),
            text: text.map(|s| s.to_string()),
        };
        self.call_api("answerCallbackQuery", &request).await?;
        Ok(())
    }

    async fn clear_inline_keyboard(&self, chat_id: &str, message_id: i64) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct EditReplyMarkupRequest {
            chat_id: String,
            message_id: i64,
            reply_markup: InlineKeyboardMarkup,
        }

        let request = EditReplyMarkupRequest {
            chat_id: chat_id.to_string(),
            message_id,
            reply_markup: InlineKeyboardMarkup {
                inline_keyboard: Vec::new(),
            },
        };
        self.call_api("editMessageReplyMarkup", &request).await?;
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
