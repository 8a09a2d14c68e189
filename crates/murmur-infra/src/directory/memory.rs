//! In-memory Directory Service.
//!
//! Profile store backed by a HashMap. Works within a single process only;
//! data is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use murmur_core::domain::Identity;
use murmur_core::error::DirectoryError;
use murmur_core::ports::DirectoryService;

/// In-memory profile store enforcing id uniqueness on create.
#[derive(Default)]
pub struct InMemoryDirectory {
    profiles: RwLock<HashMap<Uuid, Identity>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a profile directly, bypassing the uniqueness check.
    /// Seeding helper for demos and tests.
    pub async fn seed(&self, profile: Identity) {
        self.profiles.write().await.insert(profile.id, profile);
    }
}

#[async_trait]
impl DirectoryService for InMemoryDirectory {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Identity>, DirectoryError> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn create_profile(&self, profile: Identity) -> Result<Identity, DirectoryError> {
        let mut profiles = self.profiles.write().await;

        if profiles.contains_key(&profile.id) {
            return Err(DirectoryError::Conflict(profile.id));
        }

        tracing::debug!(user_id = %profile.id, username = %profile.username, "Profile created");
        profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(nickname: &str) -> Identity {
        Identity {
            id: Uuid::new_v4(),
            full_name: String::new(),
            nickname: nickname.to_string(),
            username: nickname.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let directory = InMemoryDirectory::new();
        let created = directory.create_profile(profile("alex")).await.unwrap();

        let fetched = directory.get_profile(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_get_absent_profile() {
        let directory = InMemoryDirectory::new();
        assert_eq!(directory.get_profile(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let directory = InMemoryDirectory::new();
        let first = directory.create_profile(profile("alex")).await.unwrap();

        let mut second = profile("imposter");
        second.id = first.id;
        let err = directory.create_profile(second).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict(id) if id == first.id));

        // The winner's record is untouched
        let kept = directory.get_profile(first.id).await.unwrap().unwrap();
        assert_eq!(kept.nickname, "alex");
    }
}
