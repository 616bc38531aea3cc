//! User repository trait

use crate::core::error::StoreError;
use crate::core::ids::UserId;
use crate::user::entities::{Profile, User};
use async_trait::async_trait;

/// Durable directory of users, keyed by user id.
///
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load a user, creating an empty record on first contact.
    async fn get_or_create(&self, id: UserId) -> Result<User, StoreError>;

    /// Store the onboarding profile fields.
    async fn update_profile(&self, id: UserId, profile: &Profile) -> Result<(), StoreError>;

    /// Persist quota counters and the consultant binding.
    async fn save(&self, user: &User) -> Result<(), StoreError>;
}
