//! Conversation flow integration tests
//! Run with: cargo test --test conversation_flow_test

use std::sync::Once;

use tempfile::TempDir;

use profgid_bot::application::services::{texts, ConversationService};
use profgid_bot::domain::entities::{Action, Event, Keyboard, Stage};
use profgid_bot::domain::traits::ProfessionStore;
use profgid_bot::infrastructure::database::{SeedProfession, SqliteProfessionStore};

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

const USER: i64 = 1001;

fn seed_entries() -> Vec<SeedProfession> {
    let yaml = r#"
- name: "Программист"
  description: "Пишет и сопровождает код"
  interaction_level: 0
  education_level: 2
  categories: ["IT"]
  requirements: ["Python", "Алгоритмы"]
- name: "Менеджер по продажам"
  description: "Работает с клиентами"
  interaction_level: 2
  education_level: 1
  categories: ["Продажи"]
  requirements: ["Коммуникабельность"]
- name: "Курьер"
  description: "Доставляет заказы"
  interaction_level: 1
  education_level: 0
  categories: ["Логистика"]
- name: "Учитель"
  description: "Преподаёт в школе"
  interaction_level: 2
  education_level: 2
  categories: ["Образование"]
  requirements: ["Терпение"]
- name: "Няня"
  description: "Присматривает за детьми"
  interaction_level: 2
  education_level: 1
  categories: ["Образование"]
  requirements: ["Терпение"]
"#;
    serde_yaml::from_str(yaml).expect("seed fixture should parse")
}

struct Fixture {
    service: ConversationService<SqliteProfessionStore>,
    db_path: std::path::PathBuf,
    _dir: TempDir,
}

fn fixture() -> Fixture {
    ensure_init();
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("professions.db");
    let store = SqliteProfessionStore::open(&db_path).expect("store should open");
    store.seed(&seed_entries()).expect("seed should insert");
    Fixture {
        service: ConversationService::new(store),
        db_path,
        _dir: dir,
    }
}

fn text(s: &str) -> Event {
    Event::Text(s.to_string())
}

fn callback(payload: &str) -> Event {
    Event::Callback {
        callback_id: "cb-1".to_string(),
        message_id: None,
        payload: payload.to_string(),
    }
}

fn callback_on_message(payload: &str, message_id: i64) -> Event {
    Event::Callback {
        callback_id: "cb-1".to_string(),
        message_id: Some(message_id),
        payload: payload.to_string(),
    }
}

fn expect_send(action: &Action) -> (&str, &Keyboard) {
    match action {
        Action::Send { text, keyboard } => (text.as_str(), keyboard),
        other => panic!("expected a send action, got {other:?}"),
    }
}

fn expect_choices<'a>(action: &'a Action) -> (&'a str, &'a [String]) {
    match expect_send(action) {
        (text, Keyboard::Choices(choices)) => (text, choices),
        (text, other) => panic!("expected a choices keyboard for {text:?}, got {other:?}"),
    }
}

/// Walk a fresh user through onboarding up to the menu.
fn onboard(service: &mut ConversationService<SqliteProfessionStore>) {
    service.handle(USER, &Event::Start);
    service.handle(USER, &text("Ann"));
    let actions = service.handle(USER, &text("16"));
    let (_, choices) = expect_choices(&actions[0]);
    assert_eq!(choices.len(), 3);
    assert_eq!(service.stage_of(USER), Some(Stage::Menu));
}

#[test]
fn start_greets_and_asks_for_name() {
    let mut fx = fixture();
    let actions = fx.service.handle(USER, &Event::Start);
    assert_eq!(actions.len(), 1);
    let (greeting, keyboard) = expect_send(&actions[0]);
    assert!(greeting.contains("Как тебя зовут"));
    assert_eq!(*keyboard, Keyboard::None);
    assert_eq!(fx.service.stage_of(USER), Some(Stage::AwaitingName));
}

#[test]
fn text_without_session_starts_onboarding() {
    let mut fx = fixture();
    let actions = fx.service.handle(USER, &text("привет"));
    let (reply, _) = expect_send(&actions[0]);
    assert_eq!(reply, texts::GREETING_SHORT);
    assert_eq!(fx.service.stage_of(USER), Some(Stage::AwaitingName));
}

#[test]
fn blank_name_is_rejected() {
    let mut fx = fixture();
    fx.service.handle(USER, &Event::Start);
    let actions = fx.service.handle(USER, &text("   "));
    let (reply, _) = expect_send(&actions[0]);
    assert_eq!(reply, texts::ASK_NAME_AGAIN);
    assert_eq!(fx.service.stage_of(USER), Some(Stage::AwaitingName));
}

#[test]
fn non_numeric_age_is_rejected() {
    let mut fx = fixture();
    fx.service.handle(USER, &Event::Start);
    fx.service.handle(USER, &text("Ann"));
    let actions = fx.service.handle(USER, &text("шестнадцать"));
    let (reply, _) = expect_send(&actions[0]);
    assert_eq!(reply, texts::ASK_AGE_AGAIN);
    assert_eq!(fx.service.stage_of(USER), Some(Stage::AwaitingAge));
}

#[test]
fn onboarding_upserts_profile_and_reaches_menu() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    let conn = rusqlite::Connection::open(&fx.db_path).expect("open");
    let (name, age): (String, i64) = conn
        .query_row("SELECT name, age FROM users WHERE id = ?1", [USER], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .expect("profile row");
    assert_eq!(name, "Ann");
    assert_eq!(age, 16);
}

#[test]
fn restart_resets_the_session() {
    let mut fx = fixture();
    onboard(&mut fx.service);
    let actions = fx.service.handle(USER, &Event::Start);
    let (greeting, _) = expect_send(&actions[0]);
    assert!(greeting.contains("Как тебя зовут"));
    assert_eq!(fx.service.stage_of(USER), Some(Stage::AwaitingName));
}

#[test]
fn unknown_menu_input_reprompts_with_menu() {
    let mut fx = fixture();
    onboard(&mut fx.service);
    let actions = fx.service.handle(USER, &text("сделай что-нибудь"));
    let (reply, choices) = expect_choices(&actions[0]);
    assert_eq!(reply, texts::MENU_PICK_OPTION);
    assert_eq!(choices.len(), 3);
    assert_eq!(fx.service.stage_of(USER), Some(Stage::Menu));
}

#[test]
fn liking_people_maps_to_the_highest_interaction_level() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    fx.service.handle(USER, &text(texts::MENU_TEST));
    assert_eq!(fx.service.stage_of(USER), Some(Stage::TestInteraction));

    fx.service.handle(USER, &text("Нравится"));
    assert_eq!(fx.service.stage_of(USER), Some(Stage::TestCategory));

    // Level 2 + its own category + requirement finds the people-facing
    // profession.
    fx.service.handle(USER, &text("Продажи"));
    let actions = fx.service.handle(USER, &text("Коммуникабельность"));
    let (results, _) = expect_send(&actions[0]);
    assert!(results.contains("Менеджер по продажам"));
    assert_eq!(fx.service.stage_of(USER), Some(Stage::Menu));
}

#[test]
fn interaction_level_filters_out_mismatches() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    fx.service.handle(USER, &text(texts::MENU_TEST));
    // Level 2 against a solo-work profession: nothing matches.
    fx.service.handle(USER, &text("Нравится"));
    fx.service.handle(USER, &text("IT"));
    let actions = fx.service.handle(USER, &text("Python"));
    let (results, _) = expect_send(&actions[0]);
    assert_eq!(results, texts::NOTHING_FOUND);
    assert_eq!(fx.service.stage_of(USER), Some(Stage::Menu));
}

#[test]
fn invalid_category_choice_leaves_stage_unchanged() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    fx.service.handle(USER, &text(texts::MENU_TEST));
    fx.service.handle(USER, &text("Нейтрально"));
    let actions = fx.service.handle(USER, &text("Медицина"));
    let (reply, _) = expect_send(&actions[0]);
    assert_eq!(reply, texts::PICK_CATEGORY_BUTTON);
    assert_eq!(fx.service.stage_of(USER), Some(Stage::TestCategory));
}

#[test]
fn category_without_requirements_searches_immediately() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    fx.service.handle(USER, &text(texts::MENU_TEST));
    fx.service.handle(USER, &text("Нейтрально"));
    let actions = fx.service.handle(USER, &text("Логистика"));

    let (results, keyboard) = expect_send(&actions[0]);
    assert!(results.contains("Курьер"));
    assert!(matches!(keyboard, Keyboard::Inline(_)));
    let (done, _) = expect_choices(&actions[1]);
    assert_eq!(done, texts::DONE_BACK_TO_MENU);
    assert_eq!(fx.service.stage_of(USER), Some(Stage::Menu));
}

#[test]
fn declining_study_caps_education_at_courses() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    fx.service.handle(USER, &text(texts::MENU_CHANGE));
    assert_eq!(fx.service.stage_of(USER), Some(Stage::ChangeCurrentField));

    fx.service.handle(USER, &text("Образование"));
    assert_eq!(fx.service.stage_of(USER), Some(Stage::ChangeWantsToStay));

    fx.service.handle(USER, &text("Да"));
    let actions = fx.service.handle(USER, &text("Нет"));

    // Both professions in the category share the requirement label; the
    // keyboard keeps the duplicate.
    let (_, requirement_choices) = expect_choices(&actions[0]);
    assert_eq!(requirement_choices.len(), 2);
    assert!(requirement_choices.iter().all(|r| r == "Терпение"));

    let actions = fx.service.handle(USER, &text("Терпение"));
    let (results, _) = expect_send(&actions[0]);
    assert!(results.contains("Няня"));
    assert!(!results.contains("Учитель"));
    assert_eq!(fx.service.stage_of(USER), Some(Stage::Menu));
}

#[test]
fn leaving_the_field_asks_for_a_target_category() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    fx.service.handle(USER, &text(texts::MENU_CHANGE));
    fx.service.handle(USER, &text("IT"));
    fx.service.handle(USER, &text("Нет"));
    let actions = fx.service.handle(USER, &text("Да"));
    let (reply, _) = expect_choices(&actions[0]);
    assert_eq!(reply, texts::TARGET_FIELD_PROMPT);
    assert_eq!(fx.service.stage_of(USER), Some(Stage::ChangeTargetCategory));

    fx.service.handle(USER, &text("Продажи"));
    let actions = fx.service.handle(USER, &text("Коммуникабельность"));
    let (results, _) = expect_send(&actions[0]);
    assert!(results.contains("Менеджер по продажам"));
    assert_eq!(fx.service.stage_of(USER), Some(Stage::Menu));
}

#[test]
fn yes_no_stages_reject_free_text() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    fx.service.handle(USER, &text(texts::MENU_CHANGE));
    fx.service.handle(USER, &text("IT"));
    let actions = fx.service.handle(USER, &text("возможно"));
    let (reply, _) = expect_send(&actions[0]);
    assert_eq!(reply, texts::PICK_WITH_BUTTON);
    assert_eq!(fx.service.stage_of(USER), Some(Stage::ChangeWantsToStay));
}

#[test]
fn info_flow_lists_professions_as_buttons() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    fx.service.handle(USER, &text(texts::MENU_INFO));
    assert_eq!(fx.service.stage_of(USER), Some(Stage::InfoChooseCategory));

    let actions = fx.service.handle(USER, &text("Образование"));
    let (reply, keyboard) = expect_send(&actions[0]);
    assert_eq!(reply, texts::CHOOSE_PROFESSION);
    let Keyboard::Inline(rows) = keyboard else {
        panic!("expected inline keyboard, got {keyboard:?}");
    };
    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .all(|row| row[0].payload.starts_with("viewprof:")));
    assert_eq!(fx.service.stage_of(USER), Some(Stage::Menu));
}

#[test]
fn detail_view_renders_level_labels() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    let id = fx
        .service
        .store()
        .list_professions_in_category("Образование")
        .expect("list")
        .first()
        .expect("seeded profession")
        .id;

    let actions = fx.service.handle(USER, &callback(&format!("viewprof:{id}")));
    let (details, keyboard) = expect_send(&actions[0]);
    assert!(details.contains("Учитель"));
    assert!(details.contains("Высокий уровень общения"));
    assert!(details.contains("Университет"));
    let Keyboard::Inline(rows) = keyboard else {
        panic!("expected feedback buttons, got {keyboard:?}");
    };
    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[0][0].payload, format!("fb_yes:{id}"));
    assert_eq!(rows[0][1].payload, format!("fb_no:{id}"));
    assert!(matches!(actions[1], Action::AnswerCallback { .. }));
}

#[test]
fn detail_view_for_unknown_id_signals_not_found() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    let actions = fx.service.handle(USER, &callback("viewprof:9999"));
    assert_eq!(actions.len(), 1);
    let Action::AnswerCallback { text, .. } = &actions[0] else {
        panic!("expected a callback answer, got {:?}", actions[0]);
    };
    assert_eq!(text.as_deref(), Some(texts::PROFESSION_NOT_FOUND));
}

#[test]
fn malformed_callback_payload_is_acknowledged_without_state_change() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    for payload in ["viewprof:abc", "viewprof", "ban:5", "fb_yes:1:2"] {
        let actions = fx.service.handle(USER, &callback(payload));
        assert_eq!(actions.len(), 1, "payload {payload:?}");
        let Action::AnswerCallback { text, .. } = &actions[0] else {
            panic!("expected a callback answer for {payload:?}");
        };
        assert_eq!(text.as_deref(), Some(texts::CALLBACK_BAD_DATA));
    }
    assert_eq!(fx.service.stage_of(USER), Some(Stage::Menu));
}

#[test]
fn rate_button_reoffers_feedback_buttons() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    let actions = fx.service.handle(USER, &callback("rate:3"));
    let (reply, keyboard) = expect_send(&actions[0]);
    assert_eq!(reply, texts::RATE_PROMPT);
    let Keyboard::Inline(rows) = keyboard else {
        panic!("expected feedback buttons, got {keyboard:?}");
    };
    assert_eq!(rows[0][0].payload, "fb_yes:3");
    assert_eq!(rows[0][1].payload, "fb_no:3");
}

#[test]
fn feedback_is_recorded_acknowledged_and_buttons_cleared() {
    let mut fx = fixture();
    onboard(&mut fx.service);

    let actions = fx
        .service
        .handle(USER, &callback_on_message("fb_yes:2", 77));
    let (ack, _) = expect_send(&actions[0]);
    assert_eq!(ack, texts::FEEDBACK_THANKS_YES);
    assert!(matches!(
        actions[1],
        Action::ClearInlineKeyboard { message_id: 77 }
    ));
    assert!(matches!(actions[2], Action::AnswerCallback { .. }));

    // A second vote appends instead of replacing.
    let actions = fx
        .service
        .handle(USER, &callback_on_message("fb_no:2", 78));
    let (ack, _) = expect_send(&actions[0]);
    assert_eq!(ack, texts::FEEDBACK_THANKS_NO);

    let conn = rusqlite::Connection::open(&fx.db_path).expect("open");
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM users_feedback WHERE user_id = ?1 AND profession_id = 2",
            [USER],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(count, 2);
}

#[test]
fn two_users_converse_independently() {
    let mut fx = fixture();
    const OTHER: i64 = 2002;

    onboard(&mut fx.service);
    fx.service.handle(OTHER, &Event::Start);
    fx.service.handle(OTHER, &text("Боб"));

    assert_eq!(fx.service.stage_of(USER), Some(Stage::Menu));
    assert_eq!(fx.service.stage_of(OTHER), Some(Stage::AwaitingAge));
}
