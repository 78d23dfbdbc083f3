/// Placeholder shown when a stored level value falls outside the known range.
pub const LEVEL_UNKNOWN: &str = "—";

/// How much day-to-day communication a profession involves.
///
/// Stored as 0..=2 in the `professions` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionLevel {
    /// Mostly independent work.
    Independent,
    /// A mix of individual and team work.
    Mixed,
    /// Constant work with people or clients.
    PeopleFacing,
}

impl InteractionLevel {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(InteractionLevel::Independent),
            1 => Some(InteractionLevel::Mixed),
            2 => Some(InteractionLevel::PeopleFacing),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i64 {
        match self {
            InteractionLevel::Independent => 0,
            InteractionLevel::Mixed => 1,
            InteractionLevel::PeopleFacing => 2,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            InteractionLevel::Independent => {
                "🟦 Низкая необходимость общения — работа преимущественно самостоятельная"
            }
            InteractionLevel::Mixed => {
                "🟩 Умеренный уровень общения — сочетание индивидуальной работы и командного взаимодействия"
            }
            InteractionLevel::PeopleFacing => {
                "🟥 Высокий уровень общения — постоянная работа с людьми/клиентами"
            }
        }
    }

    /// Human-readable label for a raw stored value, falling back for
    /// anything outside the 0..=2 range.
    pub fn label_for(raw: i64) -> &'static str {
        Self::from_raw(raw)
            .map(Self::describe)
            .unwrap_or(LEVEL_UNKNOWN)
    }
}

/// Education a profession expects. Stored as 0..=3 in the `professions` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationLevel {
    /// No formal education required.
    None,
    /// Courses, college or vocational training.
    Courses,
    /// University degree.
    University,
    /// PhD or doctoral studies.
    Doctorate,
}

impl EducationLevel {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(EducationLevel::None),
            1 => Some(EducationLevel::Courses),
            2 => Some(EducationLevel::University),
            3 => Some(EducationLevel::Doctorate),
            _ => None,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            EducationLevel::None => "0 — Образование не требуется (самообучение, практика)",
            EducationLevel::Courses => "1 — Курсы / колледж / профессиональное обучение",
            EducationLevel::University => "2 — Университет (бакалавриат / магистратура)",
            EducationLevel::Doctorate => "3 — PhD / докторантура",
        }
    }

    /// Human-readable label for a raw stored value, falling back for
    /// anything outside the 0..=3 range.
    pub fn label_for(raw: i64) -> &'static str {
        Self::from_raw(raw)
            .map(Self::describe)
            .unwrap_or(LEVEL_UNKNOWN)
    }
}

/// (id, name) pair used when listing professions inside a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionSummary {
    pub id: i64,
    pub name: String,
}

/// A search hit: enough to render a result line with action buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionMatch {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Full profession record with its tag lists, as shown in the detail view.
///
/// Levels stay raw here so the renderer can fall back to [`LEVEL_UNKNOWN`]
/// for out-of-range values instead of refusing the whole record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub interaction_level: i64,
    pub education_level: i64,
    pub categories: Vec<String>,
    pub requirements: Vec<String>,
}
