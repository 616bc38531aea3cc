//! Consultant repository trait

use crate::consultant::entities::Consultant;
use crate::core::error::StoreError;
use crate::core::ids::ConsultantId;
use async_trait::async_trait;

/// Durable consultant counters and the rotation cursor.
///
/// The active roster itself comes from configuration; this store only keeps
/// per-consultant state. Implementations live in the infrastructure layer.
#[async_trait]
pub trait ConsultantRepository: Send + Sync {
    /// Create rows for any ids not yet known. Existing rows are left untouched.
    async fn ensure(&self, ids: &[ConsultantId]) -> Result<(), StoreError>;

    async fn get(&self, id: ConsultantId) -> Result<Option<Consultant>, StoreError>;

    /// Every consultant ever stored, ordered by id.
    async fn list(&self) -> Result<Vec<Consultant>, StoreError>;

    async fn increment_assigned(&self, id: ConsultantId) -> Result<(), StoreError>;

    async fn increment_answered(&self, id: ConsultantId) -> Result<(), StoreError>;

    /// Overwrite the cached display name and handle.
    async fn update_identity(
        &self,
        id: ConsultantId,
        display_name: Option<&str>,
        display_handle: Option<&str>,
    ) -> Result<(), StoreError>;

    async fn rotation_cursor(&self) -> Result<usize, StoreError>;

    async fn set_rotation_cursor(&self, index: usize) -> Result<(), StoreError>;
}
