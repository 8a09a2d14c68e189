use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Identity;
use crate::error::DirectoryError;

/// Directory Service - the external store of display profiles for
/// authenticated users.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Fetch the persisted profile for a user, if one exists.
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Identity>, DirectoryError>;

    /// Persist a new profile.
    ///
    /// Uniqueness is keyed by user id; losing a creation race surfaces as
    /// [`DirectoryError::Conflict`], never as silent data loss.
    async fn create_profile(&self, profile: Identity) -> Result<Identity, DirectoryError>;
}
