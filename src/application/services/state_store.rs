use std::collections::HashMap;

use crate::domain::entities::Session;

/// Per-user conversation sessions, keyed by external user identity.
///
/// Owned by the conversation service and injected at construction, so
/// tests can run independent conversations without shared module state.
/// Sessions live until the process ends; `/start` replaces them.
#[derive(Debug, Default)]
pub struct StateStore {
    sessions: HashMap<i64, Session>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: i64) -> Option<&Session> {
        self.sessions.get(&user_id)
    }

    pub fn get_mut(&mut self, user_id: i64) -> Option<&mut Session> {
        self.sessions.get_mut(&user_id)
    }

    /// Create (or reset) the session for a user and return it.
    pub fn reset(&mut self, user_id: i64) -> &mut Session {
        let session = self.sessions.entry(user_id).or_default();
        *session = Session::new();
        session
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
