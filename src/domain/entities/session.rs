/// Conversation stages. Every inbound text is interpreted against the
/// user's current stage; callbacks are handled independently of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingName,
    AwaitingAge,
    Menu,
    TestInteraction,
    TestCategory,
    TestRequirement,
    ChangeCurrentField,
    ChangeWantsToStay,
    ChangeReadyToStudy,
    ChangeTargetCategory,
    ChangeChooseRequirement,
    InfoChooseCategory,
}

/// Answers accumulated while walking the conversation flows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub interaction_level: Option<i64>,
    pub category: Option<String>,
    pub current_field: Option<String>,
    pub wants_to_stay: Option<bool>,
    pub ready_to_study: Option<bool>,
    pub target_field: Option<String>,
}

impl Answers {
    /// Education cap for the change-field flow: declining further study
    /// limits results to education level 1.
    pub fn education_cap(&self) -> Option<i64> {
        match self.ready_to_study {
            Some(false) => Some(1),
            _ => None,
        }
    }

    /// The category the change-field flow is effectively working in:
    /// the current field when staying, the target field otherwise.
    pub fn active_field(&self) -> Option<&str> {
        if self.wants_to_stay == Some(true) {
            self.current_field.as_deref()
        } else {
            self.target_field.as_deref()
        }
    }
}

/// One user's conversation state: current stage plus collected answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub stage: Stage,
    pub answers: Answers,
}

impl Session {
    pub fn new() -> Self {
        Self {
            stage: Stage::AwaitingName,
            answers: Answers::default(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
