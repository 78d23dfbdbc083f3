//! Fixed response texts and button labels.

pub const GREETING: &str = "👋 Привет!\n\nЯ — ПрофГайд Бот 🤖✨\nПомогу подобрать профессию, сменить карьеру или узнать о специальности.\n\nДавай познакомимся! Как тебя зовут?";

pub const GREETING_SHORT: &str = "Привет! Как тебя зовут?";

pub const HELP: &str = "📘 Справка\n\nВот что я умею:\n\n🔹 Пройти тест — подберу профессии по интересам и стилю работы.\n🔹 Сменить профессию — подскажу варианты при смене сферы и с учётом готовности учиться.\n🔹 Узнать про профессию — покажу подробности (требования, образование, путь).\n🔹 Оставить отзыв — скажи, подошла ли профессия.\n\nИспользуй кнопки — так удобнее 😊";

// Menu
pub const MENU_TEST: &str = "📘 Пройти тест";
pub const MENU_CHANGE: &str = "🔁 Сменить профессию";
pub const MENU_INFO: &str = "ℹ️ Про профессию";
pub const MENU_PROMPT: &str = "Отлично! Чем хочешь заняться?";
pub const MENU_PICK_OPTION: &str = "Выбери опцию из меню:";

// Onboarding
pub const ASK_NAME_AGAIN: &str = "Напиши, пожалуйста, своё имя (текстом).";
pub const ASK_AGE_AGAIN: &str = "Пожалуйста, введи возраст числом (например: 16).";

// Test flow
pub const INTERACTION_PROMPT: &str = "Как ты относишься к общению с людьми?";
pub const OPTION_LIKE: &str = "Нравится";
pub const OPTION_NEUTRAL: &str = "Нейтрально";
pub const OPTION_DISLIKE: &str = "Не люблю";
pub const PICK_OPTION_BUTTON: &str = "Пожалуйста, выбери один из вариантов кнопками.";
pub const CHOOSE_LIKED_CATEGORY: &str = "Выбери категорию, которая тебе нравится:";
pub const CHOOSE_REQUIREMENT: &str = "Выбери навык/требование, которое тебе ближе:";
pub const PICK_CATEGORY_BUTTON: &str = "Пожалуйста, выбери категорию кнопкой.";
pub const PICK_REQUIREMENT_BUTTON: &str = "Пожалуйста, выбери требование кнопкой.";

// Change-field flow
pub const CURRENT_FIELD_PROMPT: &str = "В какой сфере ты сейчас работаешь? (выбери категорию)";
pub const YES: &str = "Да";
pub const NO: &str = "Нет";
pub const PICK_WITH_BUTTON: &str = "Выбери кнопкой.";
pub const STUDY_PROMPT: &str =
    "Готов(а) получать новое образование (например, курсы/колледж/университет)?";
pub const TARGET_FIELD_PROMPT: &str = "В какую сферу хочешь перейти? (выбери категорию)";
pub const CHOOSE_REQUIREMENT_SHORT: &str = "Выбери требование/навык:";
pub const CHOOSE_REQUIREMENT_PLAIN: &str = "Выбери требование:";
pub const PICK_CATEGORY_BUTTON_SHORT: &str = "Выбери категорию кнопкой.";
pub const PICK_REQUIREMENT_BUTTON_SHORT: &str = "Выбери требование кнопкой.";

// Info flow
pub const INFO_CATEGORY_PROMPT: &str = "Выбери категорию, чтобы посмотреть профессии:";
pub const NO_PROFESSIONS_IN_CATEGORY: &str = "В этой категории пока нет профессий.";
pub const CHOOSE_PROFESSION: &str = "Выбери профессию, чтобы увидеть детали:";
pub const BACK_TO_MENU_QUESTION: &str = "Вернуться в меню?";

// Results
pub const NO_CATEGORIES: &str = "В базе пока нет категорий.";
pub const NOTHING_FOUND: &str = "Ничего не найдено по вашим критериям.";
pub const RESULTS_HEADER: &str = "Найденные профессии:";
pub const VIEW_DETAILS_BUTTON: &str = "Подробнее";
pub const RATE_BUTTON: &str = "Оценить";
pub const DONE_BACK_TO_MENU: &str = "Готово — вернулись в меню.";
pub const ANYTHING_ELSE: &str = "Хотите что-то ещё?";
pub const DONE_MENU: &str = "Готово! Вернулись в меню.";

// Detail view and feedback
pub const FEEDBACK_YES_BUTTON: &str = "👍 Подходит";
pub const FEEDBACK_NO_BUTTON: &str = "👎 Не подходит";
pub const RATE_PROMPT: &str = "Пожалуйста, оцени эту профессию:";
pub const FEEDBACK_THANKS_YES: &str = "🥰 Спасибо! Рад, что подсказал подходящую профессию.";
pub const FEEDBACK_THANKS_NO: &str = "Спасибо за отклик — попробуем подобрать другой вариант.";
pub const CALLBACK_BAD_DATA: &str = "Ошибка идентификатора.";
pub const PROFESSION_NOT_FOUND: &str = "Профессия не найдена.";

pub fn menu_choices() -> Vec<String> {
    vec![
        MENU_TEST.to_string(),
        MENU_CHANGE.to_string(),
        MENU_INFO.to_string(),
    ]
}

pub fn interaction_choices() -> Vec<String> {
    vec![
        OPTION_LIKE.to_string(),
        OPTION_NEUTRAL.to_string(),
        OPTION_DISLIKE.to_string(),
    ]
}

pub fn yes_no_choices() -> Vec<String> {
    vec![YES.to_string(), NO.to_string()]
}

pub fn nice_to_meet(name: &str) -> String {
    format!("Приятно познакомиться, {name}! Сколько тебе лет?")
}

pub fn stay_in_field(category: &str) -> String {
    format!("Хочешь остаться в сфере '{category}'?")
}
