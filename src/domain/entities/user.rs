/// A user profile collected during onboarding.
///
/// `id` is the external chat identity; one row per identity with
/// insert-or-replace semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl UserProfile {
    pub fn new(id: i64, name: impl Into<String>, age: i64) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }
}
