use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resolved display identity for a user.
///
/// Doubles as the Directory Service's persisted profile record. `nickname`
/// and `username` are non-empty once resolution has run; the resolver's
/// fallback chain guarantees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub full_name: String,
    pub nickname: String,
    pub username: String,
}

/// Externally-authenticated user handed to a session at start.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub metadata: Option<SignupMetadata>,
}

/// Optional display fields captured at sign-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupMetadata {
    pub full_name: Option<String>,
    pub nickname: Option<String>,
    pub username: Option<String>,
}

/// Part of an email address before the first `@`.
///
/// Absent when there is no `@` or nothing precedes it.
pub fn local_part(email: &str) -> Option<&str> {
    email
        .split_once('@')
        .map(|(local, _)| local)
        .filter(|local| !local.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_part_before_first_at() {
        assert_eq!(local_part("alex@example.com"), Some("alex"));
        assert_eq!(local_part("a@b@c"), Some("a"));
    }

    #[test]
    fn test_local_part_absent() {
        assert_eq!(local_part("not-an-email"), None);
        assert_eq!(local_part("@example.com"), None);
    }
}
