//! Monthly message quota.
//!
//! The same [`QuotaPolicy::check`] runs when a user asks to submit a
//! question and again right before the question is dispatched.

use crate::core::error::DomainError;
use crate::core::month::BillingMonth;
use crate::user::entities::User;
use serde::{Deserialize, Serialize};

/// Result of an eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    Ok,
    NotRegistered,
    LimitReached,
}

/// Per-user monthly question quota (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    limit: u32,
}

impl QuotaPolicy {
    pub fn new(limit: u32) -> Result<Self, DomainError> {
        if limit == 0 {
            return Err(DomainError::InvalidMessageLimit);
        }
        Ok(Self { limit })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Questions already sent in `month`. A stored count from any other month is ignored.
    pub fn effective_count(&self, user: &User, month: BillingMonth) -> u32 {
        if user.last_message_month == Some(month) {
            user.message_count
        } else {
            0
        }
    }

    pub fn check(&self, user: &User, month: BillingMonth) -> Eligibility {
        if !user.is_registered() {
            return Eligibility::NotRegistered;
        }
        if self.effective_count(user, month) >= self.limit {
            return Eligibility::LimitReached;
        }
        Eligibility::Ok
    }

    /// Consume one question of `month`'s quota and return the new count.
    pub fn record_question_sent(&self, user: &mut User, month: BillingMonth) -> u32 {
        if user.last_message_month == Some(month) {
            user.message_count = user.message_count.saturating_add(1);
        } else {
            user.message_count = 1;
            user.last_message_month = Some(month);
        }
        user.message_count
    }

    /// Questions left after `count` have been sent; never negative.
    pub fn remaining(&self, count: u32) -> u32 {
        self.limit.saturating_sub(count)
    }
}
