//! Consultant assignment.
//!
//! Binding a user to a consultant reads the user's stored binding and the
//! shared rotation cursor, then writes both. [`AssignmentPolicy`] runs that
//! read-modify-write under one async mutex so two unassigned users can never
//! be handed the same cursor value.

use consult_domain::{
    Assignment, AssignmentCheck, ConsultantId, ConsultantRepository, ConsultantRoster,
    RotationCursor, SenderMeta, StoreError, User, UserRepository,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The consultant chosen for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub consultant: ConsultantId,
    /// The consultant the user was bound to before, when that binding went stale.
    pub reassigned_from: Option<ConsultantId>,
}

pub struct AssignmentPolicy {
    users: Arc<dyn UserRepository>,
    consultants: Arc<dyn ConsultantRepository>,
    roster: ConsultantRoster,
    rotation: Mutex<()>,
}

impl AssignmentPolicy {
    pub fn new(
        users: Arc<dyn UserRepository>,
        consultants: Arc<dyn ConsultantRepository>,
        roster: ConsultantRoster,
    ) -> Self {
        Self {
            users,
            consultants,
            roster,
            rotation: Mutex::new(()),
        }
    }

    pub fn roster(&self) -> &ConsultantRoster {
        &self.roster
    }

    /// Create rows for every rostered consultant and pull a stored cursor
    /// back into range if the roster shrank since it was written.
    pub async fn prepare(&self) -> Result<(), StoreError> {
        self.consultants.ensure(self.roster.ids()).await?;

        let _rotation = self.rotation.lock().await;
        let stored = self.consultants.rotation_cursor().await?;
        let cursor = RotationCursor::new(stored, &self.roster);
        if cursor.index() != stored {
            warn!(
                stored,
                roster = self.roster.len(),
                "rotation cursor out of range, resetting to 0"
            );
            self.consultants.set_rotation_cursor(cursor.index()).await?;
        }
        info!(consultants = self.roster.len(), "consultant roster ready");
        Ok(())
    }

    /// Pick the consultant for `user`'s next question, binding them if needed.
    ///
    /// An active binding is returned as is and the cursor is not touched.
    pub async fn resolve(&self, user: &mut User) -> Result<Resolution, StoreError> {
        if let AssignmentCheck::Active(consultant) = user.assignment.check(&self.roster) {
            return Ok(Resolution {
                consultant,
                reassigned_from: None,
            });
        }

        let _rotation = self.rotation.lock().await;

        // Re-read under the lock; a concurrent request may have bound this user.
        let stored = self.users.get_or_create(user.id).await?;
        let reassigned_from = match stored.assignment.check(&self.roster) {
            AssignmentCheck::Active(consultant) => {
                user.assignment = stored.assignment;
                return Ok(Resolution {
                    consultant,
                    reassigned_from: None,
                });
            }
            AssignmentCheck::NeedsRotation { previous } => previous,
        };

        let cursor = RotationCursor::new(self.consultants.rotation_cursor().await?, &self.roster);
        let (consultant, next) = cursor.select(&self.roster);

        user.assignment = Assignment::Assigned(consultant);
        self.users.save(user).await?;
        self.consultants.set_rotation_cursor(next.index()).await?;

        info!(
            user_id = %user.id,
            consultant_id = %consultant,
            previous = ?reassigned_from,
            next_cursor = next.index(),
            "user bound to consultant"
        );
        Ok(Resolution {
            consultant,
            reassigned_from,
        })
    }

    /// Count one dispatched question against `consultant`.
    pub async fn record_assigned(&self, consultant: ConsultantId) -> Result<(), StoreError> {
        self.consultants.increment_assigned(consultant).await
    }

    /// Count one relayed reply and refresh the consultant's cached identity.
    ///
    /// The identity refresh is best-effort; a failure there is only logged.
    pub async fn record_answered(
        &self,
        consultant: ConsultantId,
        sender: &SenderMeta,
    ) -> Result<(), StoreError> {
        self.consultants.increment_answered(consultant).await?;
        if let Err(e) = self
            .consultants
            .update_identity(
                consultant,
                sender.display_name.as_deref(),
                sender.handle.as_deref(),
            )
            .await
        {
            warn!(consultant_id = %consultant, error = %e, "could not refresh consultant identity");
        } else {
            debug!(consultant_id = %consultant, "consultant identity refreshed");
        }
        Ok(())
    }
}
