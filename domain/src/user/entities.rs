//! User domain entities

use crate::consultant::assignment::Assignment;
use crate::core::ids::UserId;
use crate::core::month::BillingMonth;
use serde::{Deserialize, Serialize};

/// Profile fields collected once during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

impl Profile {
    pub fn new(
        full_name: impl Into<String>,
        phone: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            full_name: Some(full_name.into()),
            phone: Some(phone.into()),
            city: Some(city.into()),
        }
    }

    /// A user counts as registered once a non-empty display name is stored.
    pub fn is_registered(&self) -> bool {
        self.full_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

/// A user of the consultation service (Entity)
///
/// `message_count` is only meaningful for `last_message_month`; see
/// [`QuotaPolicy::effective_count`](crate::user::quota::QuotaPolicy::effective_count).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub profile: Profile,
    pub message_count: u32,
    pub last_message_month: Option<BillingMonth>,
    pub assignment: Assignment,
}

impl User {
    /// A freshly seen user: empty profile, no quota history, no consultant.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            profile: Profile::default(),
            message_count: 0,
            last_message_month: None,
            assignment: Assignment::Unassigned,
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn is_registered(&self) -> bool {
        self.profile.is_registered()
    }

    pub fn display_name(&self) -> &str {
        self.profile.full_name.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_unregistered_and_unassigned() {
        let user = User::new(UserId::new(5));
        assert!(!user.is_registered());
        assert_eq!(user.message_count, 0);
        assert!(user.last_message_month.is_none());
        assert_eq!(user.assignment, Assignment::Unassigned);
    }

    #[test]
    fn test_blank_name_is_not_registered() {
        let profile = Profile {
            full_name: Some("   ".into()),
            ..Profile::default()
        };
        assert!(!profile.is_registered());
    }

    #[test]
    fn test_name_alone_registers() {
        let user = User::new(UserId::new(5)).with_profile(Profile {
            full_name: Some("Sara Ahmadi".into()),
            ..Profile::default()
        });
        assert!(user.is_registered());
        assert_eq!(user.display_name(), "Sara Ahmadi");
    }
}
