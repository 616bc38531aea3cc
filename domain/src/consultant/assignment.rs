//! Sticky consultant assignment with round-robin fallback.
//!
//! A user is either [`Assignment::Unassigned`] or bound to one consultant.
//! The binding is reused for as long as that consultant stays on the
//! roster; once it drops off, the user falls back to rotation.
//!
//! ```
//! use consult_domain::{Assignment, AssignmentCheck, ConsultantId, ConsultantRoster, RotationCursor};
//!
//! let roster = ConsultantRoster::new(vec![ConsultantId::new(1), ConsultantId::new(2)]).unwrap();
//! let cursor = RotationCursor::new(1, &roster);
//!
//! assert_eq!(
//!     Assignment::Unassigned.check(&roster),
//!     AssignmentCheck::NeedsRotation { previous: None }
//! );
//! let (picked, next) = cursor.select(&roster);
//! assert_eq!(picked, ConsultantId::new(2));
//! assert_eq!(next.index(), 0);
//! ```

use crate::consultant::entities::ConsultantRoster;
use crate::core::ids::ConsultantId;
use serde::{Deserialize, Serialize};

/// A user's consultant binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "consultant", rename_all = "snake_case")]
pub enum Assignment {
    #[default]
    Unassigned,
    Assigned(ConsultantId),
}

/// What a binding means against the current roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentCheck {
    /// Bound to an active consultant; reuse without touching the cursor.
    Active(ConsultantId),
    /// Must pick through rotation. `previous` is set when an old binding went stale.
    NeedsRotation { previous: Option<ConsultantId> },
}

impl Assignment {
    pub fn from_option(id: Option<ConsultantId>) -> Self {
        id.map_or(Assignment::Unassigned, Assignment::Assigned)
    }

    pub fn consultant(&self) -> Option<ConsultantId> {
        match self {
            Assignment::Unassigned => None,
            Assignment::Assigned(id) => Some(*id),
        }
    }

    pub fn check(&self, roster: &ConsultantRoster) -> AssignmentCheck {
        match *self {
            Assignment::Assigned(id) if roster.contains(id) => AssignmentCheck::Active(id),
            Assignment::Assigned(id) => AssignmentCheck::NeedsRotation { previous: Some(id) },
            Assignment::Unassigned => AssignmentCheck::NeedsRotation { previous: None },
        }
    }
}

/// Index of the consultant who receives the next unassigned user.
///
/// Always within `0..roster.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotationCursor(usize);

impl RotationCursor {
    /// Build a cursor for `roster`, resetting out-of-range stored values to 0.
    pub fn new(index: usize, roster: &ConsultantRoster) -> Self {
        if index < roster.len() {
            Self(index)
        } else {
            Self(0)
        }
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// Consume the cursor: the consultant it points at, and the advanced cursor.
    pub fn select(self, roster: &ConsultantRoster) -> (ConsultantId, RotationCursor) {
        let current = Self::new(self.0, roster);
        let picked = roster.at(current.0);
        (picked, Self((current.0 + 1) % roster.len()))
    }
}
