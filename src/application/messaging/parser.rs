//! Inbound parsing - raw transport input into structured events

use crate::application::errors::CallbackParseError;
use crate::domain::entities::{CallbackAction, Event};

/// Parses raw message text into events the controller understands.
pub struct EventParser;

impl EventParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a text message. `/start` and `/help` become commands;
    /// anything else (including unknown commands) is plain text and gets
    /// validated against the current stage.
    pub fn parse_text(&self, text: &str) -> Event {
        let trimmed = text.trim();
        if let Some(rest) = trimmed.strip_prefix('/') {
            let name = rest.split_whitespace().next().unwrap_or("");
            // Group chats append the bot mention: /start@some_bot
            let name = name.split('@').next().unwrap_or(name);
            match name {
                "start" => return Event::Start,
                "help" => return Event::Help,
                _ => {}
            }
        }
        Event::Text(trimmed.to_string())
    }
}

impl Default for EventParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode an inline-button payload of the form `<kind>:<profession id>`.
pub fn parse_callback(payload: &str) -> Result<CallbackAction, CallbackParseError> {
    let mut parts = payload.split(':');
    let (Some(kind), Some(raw_id), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CallbackParseError::BadShape);
    };

    let id: i64 = raw_id
        .parse()
        .map_err(|_| CallbackParseError::BadId(raw_id.to_string()))?;

    match kind {
        "viewprof" => Ok(CallbackAction::ViewProfession(id)),
        "rate" => Ok(CallbackAction::Rate(id)),
        "fb_yes" => Ok(CallbackAction::Feedback {
            profession_id: id,
            satisfied: true,
        }),
        "fb_no" => Ok(CallbackAction::Feedback {
            profession_id: id,
            satisfied: false,
        }),
        other => Err(CallbackParseError::UnknownKind(other.to_string())),
    }
}
