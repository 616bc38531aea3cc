use consult_application::SessionStore;
use consult_domain::{ConversationState, UserId};
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local conversation state.
///
/// State is lost on restart, which drops users back to `Idle`.
#[derive(Default)]
pub struct InMemorySessionStore {
    states: RwLock<HashMap<UserId, ConversationState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Users currently in a non-idle state.
    pub fn active(&self) -> usize {
        self.states.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user: UserId) -> ConversationState {
        self.states
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }

    fn set(&self, user: UserId, state: ConversationState) {
        let mut states = self.states.write().unwrap_or_else(|e| e.into_inner());
        if state.is_idle() {
            states.remove(&user);
        } else {
            states.insert(user, state);
        }
    }

    fn clear(&self, user: UserId) {
        self.states
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&user);
    }
}
