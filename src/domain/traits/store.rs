use crate::application::errors::StorageError;
use crate::domain::entities::{ProfessionDetails, ProfessionMatch, ProfessionSummary, UserProfile};

/// Optional, ANDed filters for profession search. An unset field places
/// no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub interaction_level: Option<i64>,
    pub category: Option<String>,
    pub requirement: Option<String>,
    pub education_max: Option<i64>,
}

/// Outcome of a best-effort write. The caller decides whether a degraded
/// write is logged; it is never surfaced to the user.
#[must_use]
#[derive(Debug)]
pub enum WriteOutcome {
    Persisted,
    Degraded(StorageError),
}

impl WriteOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, WriteOutcome::Persisted)
    }
}

impl From<Result<(), StorageError>> for WriteOutcome {
    fn from(result: Result<(), StorageError>) -> Self {
        match result {
            Ok(()) => WriteOutcome::Persisted,
            Err(err) => WriteOutcome::Degraded(err),
        }
    }
}

/// Store trait - abstraction for the profession reference data and the
/// profile/feedback writes behind the conversation flows.
///
/// Read operations report "no rows" as an empty collection, never an error.
pub trait ProfessionStore: Send + Sync {
    /// Distinct category labels, alphabetically ordered.
    fn list_categories(&self) -> Result<Vec<String>, StorageError>;

    /// Requirement labels for professions tagged with `category`.
    /// Duplicates are kept when several professions share a requirement.
    fn list_requirements(&self, category: &str) -> Result<Vec<String>, StorageError>;

    /// (id, name) pairs for professions tagged with `category`.
    fn list_professions_in_category(
        &self,
        category: &str,
    ) -> Result<Vec<ProfessionSummary>, StorageError>;

    /// Full record with nested tag lists, or `None` for an unknown id.
    fn profession_details(&self, id: i64) -> Result<Option<ProfessionDetails>, StorageError>;

    /// Distinct professions matching every supplied filter.
    fn search_professions(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<ProfessionMatch>, StorageError>;

    /// Insert or replace a user profile by id.
    fn upsert_user(&self, profile: &UserProfile) -> Result<(), StorageError>;

    /// Append one feedback row. Repeats for the same (user, profession)
    /// produce new rows.
    fn record_feedback(
        &self,
        user_id: i64,
        profession_id: i64,
        satisfied: bool,
    ) -> Result<(), StorageError>;
}
