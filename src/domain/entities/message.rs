/// Inbound events as produced by the transport adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `/start` command: begins (or restarts) the conversation.
    Start,
    /// `/help` command.
    Help,
    /// Free text or a pressed reply-keyboard button.
    Text(String),
    /// An inline-button press with its raw payload.
    Callback {
        callback_id: String,
        /// Id of the message carrying the pressed button, when known.
        message_id: Option<i64>,
        payload: String,
    },
}

/// Typed payloads carried by inline buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Open the detail view for a profession.
    ViewProfession(i64),
    /// Re-offer the feedback buttons for a profession.
    Rate(i64),
    /// Record thumbs-up/down feedback.
    Feedback { profession_id: i64, satisfied: bool },
}

impl CallbackAction {
    /// Wire encoding used in inline-button payloads.
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::ViewProfession(id) => format!("viewprof:{id}"),
            CallbackAction::Rate(id) => format!("rate:{id}"),
            CallbackAction::Feedback {
                profession_id,
                satisfied: true,
            } => format!("fb_yes:{profession_id}"),
            CallbackAction::Feedback {
                profession_id,
                satisfied: false,
            } => format!("fb_no:{profession_id}"),
        }
    }
}

/// One inline button: a label plus the callback payload it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub payload: String,
}

impl InlineButton {
    pub fn new(text: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            payload: payload.into(),
        }
    }
}

/// Keyboard attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    None,
    /// One-time reply keyboard with fixed choices, one per row.
    Choices(Vec<String>),
    /// Inline action buttons, laid out in rows.
    Inline(Vec<Vec<InlineButton>>),
}

/// Outbound actions the controller asks the transport to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Send { text: String, keyboard: Keyboard },
    AnswerCallback {
        callback_id: String,
        text: Option<String>,
    },
    /// Retract the inline buttons of an earlier message. Best-effort.
    ClearInlineKeyboard { message_id: i64 },
}

impl Action {
    pub fn send(text: impl Into<String>) -> Self {
        Action::Send {
            text: text.into(),
            keyboard: Keyboard::None,
        }
    }

    pub fn send_with_choices(text: impl Into<String>, choices: Vec<String>) -> Self {
        Action::Send {
            text: text.into(),
            keyboard: Keyboard::Choices(choices),
        }
    }

    pub fn send_with_inline(text: impl Into<String>, rows: Vec<Vec<InlineButton>>) -> Self {
        Action::Send {
            text: text.into(),
            keyboard: Keyboard::Inline(rows),
        }
    }

    pub fn answer_callback(callback_id: impl Into<String>, text: Option<&str>) -> Self {
        Action::AnswerCallback {
            callback_id: callback_id.into(),
            text: text.map(|s| s.to_string()),
        }
    }
}
