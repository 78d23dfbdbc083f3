//! Conversation controller: one state record per user, advanced on each
//! inbound event, producing outbound actions for the transport to execute.

use crate::application::messaging::parser;
use crate::application::services::state_store::StateStore;
use crate::application::services::texts;
use crate::domain::entities::{
    Action, CallbackAction, EducationLevel, Event, InlineButton, InteractionLevel, ProfessionMatch,
    Session, Stage, UserProfile,
};
use crate::domain::traits::{ProfessionStore, SearchFilter, WriteOutcome};

/// Drives the per-user conversation state machine over an injected
/// profession store. Transport-agnostic: the caller executes the returned
/// actions through a `Bot` adapter.
pub struct ConversationService<S: ProfessionStore> {
    store: S,
    states: StateStore,
}

impl<S: ProfessionStore> ConversationService<S> {
    pub fn new(store: S) -> Self {
        Self::with_state_store(store, StateStore::new())
    }

    pub fn with_state_store(store: S, states: StateStore) -> Self {
        Self { store, states }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current stage for a user, if a session exists. Used by tests and
    /// diagnostics; the controller itself goes through the state store.
    pub fn stage_of(&self, user_id: i64) -> Option<Stage> {
        self.states.get(user_id).map(|s| s.stage)
    }

    /// Advance the conversation for `user_id` with one inbound event.
    pub fn handle(&mut self, user_id: i64, event: &Event) -> Vec<Action> {
        match event {
            Event::Start => self.on_start(user_id),
            Event::Help => vec![Action::send(texts::HELP)],
            Event::Text(text) => self.on_text(user_id, text.trim()),
            Event::Callback {
                callback_id,
                message_id,
                payload,
            } => self.on_callback(user_id, callback_id, *message_id, payload),
        }
    }

    fn on_start(&mut self, user_id: i64) -> Vec<Action> {
        self.states.reset(user_id);
        vec![Action::send(texts::GREETING)]
    }

    fn on_text(&mut self, user_id: i64, text: &str) -> Vec<Action> {
        let ConversationService { store, states } = self;

        if states.get(user_id).is_none() {
            states.reset(user_id);
            return vec![Action::send(texts::GREETING_SHORT)];
        }
        let Some(session) = states.get_mut(user_id) else {
            return Vec::new();
        };

        match session.stage {
            Stage::AwaitingName => Self::on_awaiting_name(session, text),
            Stage::AwaitingAge => Self::on_awaiting_age(store, session, user_id, text),
            Stage::Menu => Self::on_menu(store, session, text),
            Stage::TestInteraction => Self::on_test_interaction(store, session, text),
            Stage::TestCategory => Self::on_test_category(store, session, text),
            Stage::TestRequirement => Self::on_test_requirement(store, session, text),
            Stage::ChangeCurrentField => Self::on_change_current_field(store, session, text),
            Stage::ChangeWantsToStay => Self::on_change_wants_to_stay(session, text),
            Stage::ChangeReadyToStudy => Self::on_change_ready_to_study(store, session, text),
            Stage::ChangeTargetCategory => Self::on_change_target_category(store, session, text),
            Stage::ChangeChooseRequirement => {
                Self::on_change_choose_requirement(store, session, text)
            }
            Stage::InfoChooseCategory => Self::on_info_choose_category(store, session, text),
        }
    }

    // Onboarding

    fn on_awaiting_name(session: &mut Session, text: &str) -> Vec<Action> {
        if text.is_empty() {
            return vec![Action::send(texts::ASK_NAME_AGAIN)];
        }
        session.answers.name = Some(text.to_string());
        session.stage = Stage::AwaitingAge;
        vec![Action::send(texts::nice_to_meet(text))]
    }

    fn on_awaiting_age(
        store: &S,
        session: &mut Session,
        user_id: i64,
        text: &str,
    ) -> Vec<Action> {
        let Ok(age) = text.parse::<i64>() else {
            return vec![Action::send(texts::ASK_AGE_AGAIN)];
        };
        session.answers.age = Some(age);

        let name = session.answers.name.clone().unwrap_or_default();
        let outcome = WriteOutcome::from(store.upsert_user(&UserProfile::new(user_id, name, age)));
        if let WriteOutcome::Degraded(err) = outcome {
            tracing::warn!("user profile upsert failed: {err}");
        }

        session.stage = Stage::Menu;
        vec![Action::send_with_choices(
            texts::MENU_PROMPT,
            texts::menu_choices(),
        )]
    }

    // Menu

    fn on_menu(store: &S, session: &mut Session, text: &str) -> Vec<Action> {
        match text {
            texts::MENU_TEST => {
                session.stage = Stage::TestInteraction;
                vec![Action::send_with_choices(
                    texts::INTERACTION_PROMPT,
                    texts::interaction_choices(),
                )]
            }
            texts::MENU_CHANGE => {
                let categories = Self::categories_or_empty(store);
                if categories.is_empty() {
                    return vec![Action::send(texts::NO_CATEGORIES)];
                }
                session.stage = Stage::ChangeCurrentField;
                vec![Action::send_with_choices(
                    texts::CURRENT_FIELD_PROMPT,
                    categories,
                )]
            }
            texts::MENU_INFO => {
                let categories = Self::categories_or_empty(store);
                if categories.is_empty() {
                    return vec![Action::send(texts::NO_CATEGORIES)];
                }
                session.stage = Stage::InfoChooseCategory;
                vec![Action::send_with_choices(
                    texts::INFO_CATEGORY_PROMPT,
                    categories,
                )]
            }
            _ => vec![Action::send_with_choices(
                texts::MENU_PICK_OPTION,
                texts::menu_choices(),
            )],
        }
    }

    // Test flow

    fn on_test_interaction(store: &S, session: &mut Session, text: &str) -> Vec<Action> {
        let level = match text.to_lowercase().as_str() {
            "не люблю" => InteractionLevel::Independent,
            "нейтрально" => InteractionLevel::Mixed,
            "нравится" => InteractionLevel::PeopleFacing,
            _ => return vec![Action::send(texts::PICK_OPTION_BUTTON)],
        };
        session.answers.interaction_level = Some(level.as_raw());

        let categories = Self::categories_or_empty(store);
        if categories.is_empty() {
            session.stage = Stage::Menu;
            return vec![Action::send(texts::NO_CATEGORIES)];
        }

        session.stage = Stage::TestCategory;
        vec![Action::send_with_choices(
            texts::CHOOSE_LIKED_CATEGORY,
            categories,
        )]
    }

    fn on_test_category(store: &S, session: &mut Session, text: &str) -> Vec<Action> {
        let categories = Self::categories_or_empty(store);
        if !categories.iter().any(|c| c == text) {
            return vec![Action::send(texts::PICK_CATEGORY_BUTTON)];
        }
        session.answers.category = Some(text.to_string());

        let requirements = Self::requirements_or_empty(store, text);
        if requirements.is_empty() {
            // No requirements to narrow by; search right away.
            let filter = SearchFilter {
                interaction_level: session.answers.interaction_level,
                category: Some(text.to_string()),
                ..SearchFilter::default()
            };
            let results = Self::search_or_empty(store, &filter);
            session.stage = Stage::Menu;
            return vec![
                Self::results_action(&results),
                Action::send_with_choices(texts::DONE_BACK_TO_MENU, texts::menu_choices()),
            ];
        }

        session.stage = Stage::TestRequirement;
        vec![Action::send_with_choices(
            texts::CHOOSE_REQUIREMENT,
            requirements,
        )]
    }

    fn on_test_requirement(store: &S, session: &mut Session, text: &str) -> Vec<Action> {
        let category = session.answers.category.clone().unwrap_or_default();
        let requirements = Self::requirements_or_empty(store, &category);
        if !requirements.iter().any(|r| r == text) {
            return vec![Action::send(texts::PICK_REQUIREMENT_BUTTON)];
        }

        let filter = SearchFilter {
            interaction_level: session.answers.interaction_level,
            category: Some(category),
            requirement: Some(text.to_string()),
            ..SearchFilter::default()
        };
        let results = Self::search_or_empty(store, &filter);

        session.stage = Stage::Menu;
        vec![
            Self::results_action(&results),
            Action::send_with_choices(texts::ANYTHING_ELSE, texts::menu_choices()),
        ]
    }

    // Change-field flow

    fn on_change_current_field(store: &S, session: &mut Session, text: &str) -> Vec<Action> {
        let categories = Self::categories_or_empty(store);
        if !categories.iter().any(|c| c == text) {
            return vec![Action::send(texts::PICK_CATEGORY_BUTTON)];
        }

        session.answers.current_field = Some(text.to_string());
        session.stage = Stage::ChangeWantsToStay;
        vec![Action::send_with_choices(
            texts::stay_in_field(text),
            texts::yes_no_choices(),
        )]
    }

    fn on_change_wants_to_stay(session: &mut Session, text: &str) -> Vec<Action> {
        if text != texts::YES && text != texts::NO {
            return vec![Action::send(texts::PICK_WITH_BUTTON)];
        }
        session.answers.wants_to_stay = Some(text == texts::YES);
        session.stage = Stage::ChangeReadyToStudy;
        vec![Action::send_with_choices(
            texts::STUDY_PROMPT,
            texts::yes_no_choices(),
        )]
    }

    fn on_change_ready_to_study(store: &S, session: &mut Session, text: &str) -> Vec<Action> {
        if text != texts::YES && text != texts::NO {
            return vec![Action::send(texts::PICK_WITH_BUTTON)];
        }
        session.answers.ready_to_study = Some(text == texts::YES);

        if session.answers.wants_to_stay != Some(true) {
            let categories = Self::categories_or_empty(store);
            if categories.is_empty() {
                session.stage = Stage::Menu;
                return vec![Action::send(texts::NO_CATEGORIES)];
            }
            session.stage = Stage::ChangeTargetCategory;
            return vec![Action::send_with_choices(
                texts::TARGET_FIELD_PROMPT,
                categories,
            )];
        }

        let category = session.answers.current_field.clone().unwrap_or_default();
        let requirements = Self::requirements_or_empty(store, &category);
        if requirements.is_empty() {
            let filter = SearchFilter {
                category: Some(category),
                education_max: session.answers.education_cap(),
                ..SearchFilter::default()
            };
            let results = Self::search_or_empty(store, &filter);
            session.stage = Stage::Menu;
            return vec![
                Self::results_action(&results),
                Action::send_with_choices(texts::DONE_BACK_TO_MENU, texts::menu_choices()),
            ];
        }

        session.stage = Stage::ChangeChooseRequirement;
        vec![Action::send_with_choices(
            texts::CHOOSE_REQUIREMENT_SHORT,
            requirements,
        )]
    }

    fn on_change_target_category(store: &S, session: &mut Session, text: &str) -> Vec<Action> {
        let categories = Self::categories_or_empty(store);
        if !categories.iter().any(|c| c == text) {
            return vec![Action::send(texts::PICK_CATEGORY_BUTTON_SHORT)];
        }

        session.answers.target_field = Some(text.to_string());
        let requirements = Self::requirements_or_empty(store, text);
        if requirements.is_empty() {
            let filter = SearchFilter {
                category: Some(text.to_string()),
                education_max: session.answers.education_cap(),
                ..SearchFilter::default()
            };
            let results = Self::search_or_empty(store, &filter);
            session.stage = Stage::Menu;
            return vec![
                Self::results_action(&results),
                Action::send_with_choices(texts::DONE_BACK_TO_MENU, texts::menu_choices()),
            ];
        }

        session.stage = Stage::ChangeChooseRequirement;
        vec![Action::send_with_choices(
            texts::CHOOSE_REQUIREMENT_PLAIN,
            requirements,
        )]
    }

    fn on_change_choose_requirement(store: &S, session: &mut Session, text: &str) -> Vec<Action> {
        let category = session.answers.active_field().unwrap_or_default().to_string();
        let requirements = Self::requirements_or_empty(store, &category);
        if !requirements.iter().any(|r| r == text) {
            return vec![Action::send(texts::PICK_REQUIREMENT_BUTTON_SHORT)];
        }

        let filter = SearchFilter {
            category: Some(category),
            requirement: Some(text.to_string()),
            education_max: session.answers.education_cap(),
            ..SearchFilter::default()
        };
        let results = Self::search_or_empty(store, &filter);

        session.stage = Stage::Menu;
        vec![
            Self::results_action(&results),
            Action::send_with_choices(texts::DONE_MENU, texts::menu_choices()),
        ]
    }

    // Info flow

    fn on_info_choose_category(store: &S, session: &mut Session, text: &str) -> Vec<Action> {
        let categories = Self::categories_or_empty(store);
        if !categories.iter().any(|c| c == text) {
            return vec![Action::send(texts::PICK_CATEGORY_BUTTON)];
        }

        let professions = store.list_professions_in_category(text).unwrap_or_else(|err| {
            tracing::warn!("profession list unavailable: {err}");
            Vec::new()
        });

        session.stage = Stage::Menu;
        if professions.is_empty() {
            return vec![
                Action::send(texts::NO_PROFESSIONS_IN_CATEGORY),
                Action::send_with_choices(texts::BACK_TO_MENU_QUESTION, texts::menu_choices()),
            ];
        }

        let rows = professions
            .iter()
            .map(|p| {
                vec![InlineButton::new(
                    &p.name,
                    CallbackAction::ViewProfession(p.id).encode(),
                )]
            })
            .collect();
        vec![Action::send_with_inline(texts::CHOOSE_PROFESSION, rows)]
    }

    // Stage-independent callbacks

    fn on_callback(
        &mut self,
        user_id: i64,
        callback_id: &str,
        message_id: Option<i64>,
        payload: &str,
    ) -> Vec<Action> {
        let action = match parser::parse_callback(payload) {
            Ok(action) => action,
            Err(err) => {
                tracing::debug!("malformed callback payload {payload:?}: {err}");
                return vec![Action::answer_callback(
                    callback_id,
                    Some(texts::CALLBACK_BAD_DATA),
                )];
            }
        };

        match action {
            CallbackAction::ViewProfession(id) => self.view_profession(callback_id, id),
            CallbackAction::Rate(id) => Self::rate_prompt(callback_id, id),
            CallbackAction::Feedback {
                profession_id,
                satisfied,
            } => self.record_feedback(user_id, callback_id, message_id, profession_id, satisfied),
        }
    }

    fn view_profession(&self, callback_id: &str, id: i64) -> Vec<Action> {
        let details = self.store.profession_details(id).unwrap_or_else(|err| {
            tracing::warn!("profession details unavailable: {err}");
            None
        });
        let Some(p) = details else {
            return vec![Action::answer_callback(
                callback_id,
                Some(texts::PROFESSION_NOT_FOUND),
            )];
        };

        let text = format!(
            "🎯 {}\n\n{}\n\n📂 Категории: {}\n📌 Требования: {}\n\n🗣 Уровень общения: {}\n🎓 Образование: {}\n\nХотите оставить отзыв по этой профессии?",
            p.name,
            p.description,
            p.categories.join(", "),
            p.requirements.join(", "),
            InteractionLevel::label_for(p.interaction_level),
            EducationLevel::label_for(p.education_level),
        );

        vec![
            Action::send_with_inline(text, vec![Self::feedback_buttons(id)]),
            Action::answer_callback(callback_id, None),
        ]
    }

    fn rate_prompt(callback_id: &str, id: i64) -> Vec<Action> {
        vec![
            Action::send_with_inline(texts::RATE_PROMPT, vec![Self::feedback_buttons(id)]),
            Action::answer_callback(callback_id, None),
        ]
    }

    fn record_feedback(
        &self,
        user_id: i64,
        callback_id: &str,
        message_id: Option<i64>,
        profession_id: i64,
        satisfied: bool,
    ) -> Vec<Action> {
        let outcome =
            WriteOutcome::from(self.store.record_feedback(user_id, profession_id, satisfied));
        if let WriteOutcome::Degraded(err) = outcome {
            tracing::warn!("feedback insert failed: {err}");
        }

        let ack = if satisfied {
            texts::FEEDBACK_THANKS_YES
        } else {
            texts::FEEDBACK_THANKS_NO
        };

        let mut actions = vec![Action::send(ack)];
        if let Some(message_id) = message_id {
            actions.push(Action::ClearInlineKeyboard { message_id });
        }
        actions.push(Action::answer_callback(callback_id, None));
        actions
    }

    // Helpers

    fn feedback_buttons(id: i64) -> Vec<InlineButton> {
        vec![
            InlineButton::new(
                texts::FEEDBACK_YES_BUTTON,
                CallbackAction::Feedback {
                    profession_id: id,
                    satisfied: true,
                }
                .encode(),
            ),
            InlineButton::new(
                texts::FEEDBACK_NO_BUTTON,
                CallbackAction::Feedback {
                    profession_id: id,
                    satisfied: false,
                }
                .encode(),
            ),
        ]
    }

    /// Render a search result set: one text block plus per-profession
    /// detail/rate buttons, or the fixed empty-result text.
    fn results_action(results: &[ProfessionMatch]) -> Action {
        if results.is_empty() {
            return Action::send(texts::NOTHING_FOUND);
        }

        let mut lines = Vec::with_capacity(results.len());
        let mut rows = Vec::with_capacity(results.len());
        for p in results {
            lines.push(format!("🔹 {}\n{}", p.name, p.description));
            rows.push(vec![
                InlineButton::new(
                    texts::VIEW_DETAILS_BUTTON,
                    CallbackAction::ViewProfession(p.id).encode(),
                ),
                InlineButton::new(texts::RATE_BUTTON, CallbackAction::Rate(p.id).encode()),
            ]);
        }

        Action::send_with_inline(
            format!("{}\n\n{}", texts::RESULTS_HEADER, lines.join("\n\n")),
            rows,
        )
    }

    // Read failures degrade to empty collections; the flow continues
    // with the "nothing available" texts.

    fn categories_or_empty(store: &S) -> Vec<String> {
        store.list_categories().unwrap_or_else(|err| {
            tracing::warn!("category list unavailable: {err}");
            Vec::new()
        })
    }

    fn requirements_or_empty(store: &S, category: &str) -> Vec<String> {
        store.list_requirements(category).unwrap_or_else(|err| {
            tracing::warn!("requirement list unavailable: {err}");
            Vec::new()
        })
    }

    fn search_or_empty(store: &S, filter: &SearchFilter) -> Vec<ProfessionMatch> {
        store.search_professions(filter).unwrap_or_else(|err| {
            tracing::warn!("profession search failed: {err}");
            Vec::new()
        })
    }
}
