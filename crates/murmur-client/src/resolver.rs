//! Display-identity resolution.

use std::sync::Arc;

use murmur_core::domain::{AuthUser, Identity, SignupMetadata, local_part};
use murmur_core::error::DirectoryError;
use murmur_core::ports::DirectoryService;

/// Resolves (or lazily creates) the display identity for an authenticated
/// user. Leaf component: depends only on the Directory Service.
pub struct IdentityResolver {
    directory: Arc<dyn DirectoryService>,
}

impl IdentityResolver {
    pub fn new(directory: Arc<dyn DirectoryService>) -> Self {
        Self { directory }
    }

    /// Resolve the identity for `user`. Ordered attempts, first hit wins:
    /// the persisted profile, a profile created from signup metadata, a
    /// session-local identity derived from the email.
    ///
    /// Never fails: persistence problems degrade to the session-local
    /// identity instead of surfacing to the caller.
    pub async fn resolve(&self, user: &AuthUser) -> Identity {
        match self.directory.get_profile(user.id).await {
            Ok(Some(profile)) => return profile,
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(user_id = %user.id, error = %err, "Profile lookup failed, treating as absent");
            }
        }

        let email_local = user.email.as_deref().and_then(local_part);

        if let Some(meta) = user.metadata.as_ref().filter(|m| has_display_fields(m)) {
            let candidate = candidate_from_metadata(user, meta, email_local);

            match self.directory.create_profile(candidate.clone()).await {
                Ok(created) => return created,
                Err(DirectoryError::Conflict(_)) => {
                    // Lost the creation race; the winner's record is canonical.
                    if let Ok(Some(profile)) = self.directory.get_profile(user.id).await {
                        return profile;
                    }
                    tracing::warn!(user_id = %user.id, "Conflicting profile vanished, using session-local identity");
                    return candidate;
                }
                Err(err) => {
                    tracing::warn!(user_id = %user.id, error = %err, "Profile creation failed, using session-local identity");
                    return candidate;
                }
            }
        }

        // No signup metadata worth persisting: derive everything from the email.
        Identity {
            id: user.id,
            full_name: String::new(),
            nickname: email_local.unwrap_or("User").to_string(),
            username: email_local.unwrap_or("user").to_string(),
        }
    }
}

fn has_display_fields(meta: &SignupMetadata) -> bool {
    non_empty(&meta.nickname).is_some() || non_empty(&meta.full_name).is_some()
}

fn candidate_from_metadata(
    user: &AuthUser,
    meta: &SignupMetadata,
    email_local: Option<&str>,
) -> Identity {
    let nickname = non_empty(&meta.nickname)
        .or_else(|| non_empty(&meta.full_name))
        .unwrap_or("User");
    let username = non_empty(&meta.username).or(email_local).unwrap_or("user");

    Identity {
        id: user.id,
        full_name: non_empty(&meta.full_name).unwrap_or("").to_string(),
        nickname: nickname.to_string(),
        username: username.to_string(),
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
