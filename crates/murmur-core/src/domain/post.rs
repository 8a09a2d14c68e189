use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Identity;
use crate::error::SubmitError;

/// Maximum post length in unicode code points.
pub const MAX_POST_CHARS: usize = 280;

/// Post entity - one published feed entry.
///
/// `id`, `created_at` and the engagement counters are assigned by the Feed
/// Service and never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub author_nickname: String,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub like_count: u32,
    pub comment_count: u32,
    pub share_count: u32,
}

/// Submission payload for a new post.
///
/// The Feed Service assigns the id and timestamp on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDraft {
    pub content: String,
    pub author_id: Uuid,
    pub author_nickname: String,
    pub author_username: String,
    pub like_count: u32,
    pub comment_count: u32,
    pub share_count: u32,
}

impl PostDraft {
    /// Build a draft authored by `identity` from already-validated content.
    pub fn new(identity: &Identity, content: &str) -> Self {
        Self {
            content: content.to_string(),
            author_id: identity.id,
            author_nickname: identity.nickname.clone(),
            author_username: identity.username.clone(),
            like_count: 0,
            comment_count: 0,
            share_count: 0,
        }
    }
}

/// Trim `raw` and check the `1..=MAX_POST_CHARS` code point bound.
///
/// Runs before any service contact; the service is trusted to enforce the
/// same bound but never sees out-of-bound content from this client.
pub fn validate_content(raw: &str) -> Result<&str, SubmitError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SubmitError::Empty);
    }
    let length = trimmed.chars().count();
    if length > MAX_POST_CHARS {
        return Err(SubmitError::TooLong { length });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            full_name: "Alex Chen".to_string(),
            nickname: "alex".to_string(),
            username: "alex".to_string(),
        }
    }

    #[test]
    fn test_empty_content_rejected() {
        assert!(matches!(validate_content(""), Err(SubmitError::Empty)));
        assert!(matches!(validate_content("   "), Err(SubmitError::Empty)));
        assert!(matches!(validate_content("\n\t"), Err(SubmitError::Empty)));
    }

    #[test]
    fn test_too_long_content_rejected() {
        let long = "x".repeat(MAX_POST_CHARS + 1);
        assert!(matches!(
            validate_content(&long),
            Err(SubmitError::TooLong { length: 281 })
        ));
    }

    #[test]
    fn test_exactly_max_accepted() {
        let max = "x".repeat(MAX_POST_CHARS);
        assert_eq!(validate_content(&max).unwrap(), max);
    }

    #[test]
    fn test_length_counts_code_points_not_bytes() {
        // 280 four-byte code points are within bounds
        let emoji = "\u{1F980}".repeat(MAX_POST_CHARS);
        assert!(validate_content(&emoji).is_ok());
    }

    #[test]
    fn test_draft_carries_authorship_and_zero_counters() {
        let identity = identity();
        let draft = PostDraft::new(&identity, "hello");
        assert_eq!(draft.content, "hello");
        assert_eq!(draft.author_id, identity.id);
        assert_eq!(draft.author_nickname, "alex");
        assert_eq!(draft.author_username, "alex");
        assert_eq!(draft.like_count, 0);
        assert_eq!(draft.comment_count, 0);
        assert_eq!(draft.share_count, 0);
    }
}
