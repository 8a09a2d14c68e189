//! Session lifecycle - ties identity resolution to feed synchronization.
//!
//! The authenticated user and the resolved identity are explicit values
//! owned by the session, passed in at start; there is no ambient context.

use std::sync::Arc;

use murmur_core::domain::{AuthUser, Identity, Post};
use murmur_core::error::{FeedError, SubmitError};
use murmur_core::ports::{DirectoryService, FeedService};

use crate::resolver::IdentityResolver;
use crate::sync::{FeedSynchronizer, SyncState};

/// Session tuning knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How many posts the initial load requests.
    pub feed_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { feed_limit: 20 }
    }
}

/// One signed-in user's live session: the resolved identity plus the
/// synchronized feed.
pub struct Session {
    identity: Identity,
    sync: FeedSynchronizer,
    load_error: Option<FeedError>,
}

impl Session {
    /// Resolve the identity, load the recent feed, and open the push channel.
    ///
    /// An initial-load failure is kept as a diagnostic and the session
    /// starts with an empty feed. A subscription failure aborts the start;
    /// a session without live updates would silently go stale.
    pub async fn start(
        user: &AuthUser,
        directory: Arc<dyn DirectoryService>,
        feed: Arc<dyn FeedService>,
        config: SessionConfig,
    ) -> Result<Self, FeedError> {
        let identity = IdentityResolver::new(directory).resolve(user).await;
        tracing::info!(user_id = %identity.id, username = %identity.username, "Session identity resolved");

        let sync = FeedSynchronizer::new(feed);
        sync.bind_identity(identity.clone()).await;

        let load_error = sync.load_recent(config.feed_limit).await.err();
        sync.subscribe().await?;

        Ok(Self {
            identity,
            sync,
            load_error,
        })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Diagnostic from the initial load, if it failed.
    pub fn load_error(&self) -> Option<&FeedError> {
        self.load_error.as_ref()
    }

    /// Current feed contents, newest first.
    pub async fn feed(&self) -> Vec<Post> {
        self.sync.snapshot().await
    }

    pub async fn state(&self) -> SyncState {
        self.sync.state().await
    }

    /// Submit a post authored by this session's identity.
    pub async fn submit(&self, content: &str) -> Result<(), SubmitError> {
        self.sync.submit_post(content).await
    }

    /// End the session, releasing the push channel.
    pub async fn end(self) -> Result<(), FeedError> {
        self.sync.close().await
    }
}
