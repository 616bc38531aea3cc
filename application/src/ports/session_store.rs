//! Conversation state port
//!
//! Tracks which dialogue step each user is in. Access is synchronous so the
//! state can be reset from a `Drop` guard on every exit path.

use consult_domain::{ConversationState, UserId};

pub trait SessionStore: Send + Sync {
    /// Current state; users never seen are `Idle`.
    fn get(&self, user: UserId) -> ConversationState;

    fn set(&self, user: UserId, state: ConversationState);

    /// Return the user to `Idle`.
    fn clear(&self, user: UserId);
}

/// Resets a user's conversation to `Idle` when dropped.
pub struct SessionReset<'a> {
    store: &'a dyn SessionStore,
    user: UserId,
}

impl<'a> SessionReset<'a> {
    pub fn new(store: &'a dyn SessionStore, user: UserId) -> Self {
        Self { store, user }
    }
}

impl Drop for SessionReset<'_> {
    fn drop(&mut self) {
        self.store.clear(self.user);
    }
}
