//! Failure taxonomy for the session core.
//!
//! Nothing here is fatal: load failures keep prior feed state, profile
//! creation degrades to a session-local identity, and submit failures leave
//! the caller's content unconsumed for retry.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::MAX_POST_CHARS;

/// Directory Service failures.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    #[error("profile already exists for user {0}")]
    Conflict(Uuid),
}

/// Feed Service failures.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed service unavailable: {0}")]
    Unavailable(String),

    #[error("insert rejected: {0}")]
    Rejected(String),

    #[error("unknown subscription handle")]
    UnknownSubscription,
}

/// Ways a post submission can come back short of success.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Content is empty after trimming. Caught before any service contact.
    #[error("post content is empty")]
    Empty,

    /// Content exceeds the code point limit. Caught before any service contact.
    #[error("post content is {length} code points (limit {max})", max = MAX_POST_CHARS)]
    TooLong { length: usize },

    /// Identity resolution has not completed; retry once it has.
    #[error("display identity is not resolved yet")]
    IdentityNotReady,

    /// A submission from this session is already outstanding.
    #[error("another submission is already in flight")]
    AlreadyInFlight,

    /// The Feed Service failed the insert; the content can be resubmitted.
    #[error("feed service failed the submission: {0}")]
    Service(#[from] FeedError),
}
