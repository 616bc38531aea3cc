//! In-memory ports shared by the use case tests.

use crate::ports::clock::Clock;
use crate::ports::session_store::SessionStore;
use crate::ports::transport::{OutboundMessage, Recipient, Transport, TransportError};
use async_trait::async_trait;
use consult_domain::{
    BillingMonth, Consultant, ConsultantId, ConsultantRepository, ConversationState, Profile,
    StoreError, User, UserId, UserRepository,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

pub(crate) fn month(m: u32) -> BillingMonth {
    BillingMonth::new(2026, m).unwrap()
}

pub(crate) fn registered(id: i64) -> User {
    User::new(UserId::new(id)).with_profile(Profile::new("Ali Rezaei", "09123456789", "Tehran"))
}

#[derive(Default)]
pub(crate) struct MemoryUsers {
    users: Mutex<HashMap<UserId, User>>,
}

impl MemoryUsers {
    pub(crate) fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    pub(crate) fn snapshot(&self, id: UserId) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn get_or_create(&self, id: UserId) -> Result<User, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .entry(id)
            .or_insert_with(|| User::new(id))
            .clone())
    }

    async fn update_profile(&self, id: UserId, profile: &Profile) -> Result<(), StoreError> {
        self.users
            .lock()
            .unwrap()
            .entry(id)
            .or_insert_with(|| User::new(id))
            .profile = profile.clone();
        Ok(())
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MemoryConsultants {
    consultants: Mutex<BTreeMap<ConsultantId, Consultant>>,
    cursor: Mutex<usize>,
}

impl MemoryConsultants {
    pub(crate) fn with_cursor(cursor: usize) -> Self {
        Self {
            consultants: Mutex::default(),
            cursor: Mutex::new(cursor),
        }
    }

    pub(crate) fn snapshot(&self, id: ConsultantId) -> Consultant {
        self.consultants
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Consultant::new(id))
    }

    pub(crate) fn cursor(&self) -> usize {
        *self.cursor.lock().unwrap()
    }
}

#[async_trait]
impl ConsultantRepository for MemoryConsultants {
    async fn ensure(&self, ids: &[ConsultantId]) -> Result<(), StoreError> {
        let mut consultants = self.consultants.lock().unwrap();
        for id in ids {
            consultants.entry(*id).or_insert_with(|| Consultant::new(*id));
        }
        Ok(())
    }

    async fn get(&self, id: ConsultantId) -> Result<Option<Consultant>, StoreError> {
        Ok(self.consultants.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Consultant>, StoreError> {
        Ok(self.consultants.lock().unwrap().values().cloned().collect())
    }

    async fn increment_assigned(&self, id: ConsultantId) -> Result<(), StoreError> {
        self.consultants
            .lock()
            .unwrap()
            .entry(id)
            .or_insert_with(|| Consultant::new(id))
            .assigned_count += 1;
        Ok(())
    }

    async fn increment_answered(&self, id: ConsultantId) -> Result<(), StoreError> {
        self.consultants
            .lock()
            .unwrap()
            .entry(id)
            .or_insert_with(|| Consultant::new(id))
            .answered_count += 1;
        Ok(())
    }

    async fn update_identity(
        &self,
        id: ConsultantId,
        display_name: Option<&str>,
        display_handle: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut consultants = self.consultants.lock().unwrap();
        let consultant = consultants.entry(id).or_insert_with(|| Consultant::new(id));
        consultant.display_name = display_name.map(str::to_string);
        consultant.display_handle = display_handle.map(str::to_string);
        Ok(())
    }

    async fn rotation_cursor(&self) -> Result<usize, StoreError> {
        Ok(*self.cursor.lock().unwrap())
    }

    async fn set_rotation_cursor(&self, index: usize) -> Result<(), StoreError> {
        *self.cursor.lock().unwrap() = index;
        Ok(())
    }
}

/// Records deliveries; chats listed in `unreachable` fail.
#[derive(Default)]
pub(crate) struct MockTransport {
    sent: Mutex<Vec<(Recipient, OutboundMessage)>>,
    unreachable: Mutex<HashSet<i64>>,
}

impl MockTransport {
    pub(crate) fn fail_for(&self, chat_id: i64) {
        self.unreachable.lock().unwrap().insert(chat_id);
    }

    pub(crate) fn sent(&self) -> Vec<(Recipient, OutboundMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn sent_to(&self, recipient: Recipient) -> Vec<OutboundMessage> {
        self.sent()
            .into_iter()
            .filter(|(r, _)| *r == recipient)
            .map(|(_, m)| m)
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn deliver(
        &self,
        recipient: Recipient,
        message: &OutboundMessage,
    ) -> Result<(), TransportError> {
        if self.unreachable.lock().unwrap().contains(&recipient.chat_id()) {
            return Err(TransportError::Unreachable("chat not found".into()));
        }
        self.sent.lock().unwrap().push((recipient, message.clone()));
        Ok(())
    }
}

pub(crate) struct FixedClock {
    month: Mutex<BillingMonth>,
}

impl FixedClock {
    pub(crate) fn new(month: BillingMonth) -> Self {
        Self {
            month: Mutex::new(month),
        }
    }

    pub(crate) fn set(&self, month: BillingMonth) {
        *self.month.lock().unwrap() = month;
    }
}

impl Clock for FixedClock {
    fn current_month(&self) -> BillingMonth {
        *self.month.lock().unwrap()
    }
}

#[derive(Default)]
pub(crate) struct MemorySessions {
    states: Mutex<HashMap<UserId, ConversationState>>,
}

impl SessionStore for MemorySessions {
    fn get(&self, user: UserId) -> ConversationState {
        self.states
            .lock()
            .unwrap()
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }

    fn set(&self, user: UserId, state: ConversationState) {
        self.states.lock().unwrap().insert(user, state);
    }

    fn clear(&self, user: UserId) {
        self.states.lock().unwrap().remove(&user);
    }
}
